//! Static forwarding table with longest-prefix-match lookup
//!
//! Entries are kept sorted by descending prefix length, so a linear scan
//! that stops at the first containing network always finds the most
//! specific route. The table is installed as a whole and never mutated
//! entry by entry.

use std::net::Ipv4Addr;
use std::str::FromStr;

use ipnet::Ipv4Net;
use tracing::trace;

use crate::error::IpError;

/// A single route: destinations inside `network` are sent to `next_hop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForwardingEntry {
    pub network: Ipv4Net,
    pub next_hop: Ipv4Addr,
}

impl ForwardingEntry {
    /// Parse a `x.y.z.w/n` CIDR block and a dotted-decimal next hop.
    pub fn parse(cidr: &str, next_hop: &str) -> Result<Self, IpError> {
        let network =
            Ipv4Net::from_str(cidr).map_err(|_| IpError::InvalidCidr(cidr.to_string()))?;
        let next_hop = Ipv4Addr::from_str(next_hop)
            .map_err(|_| IpError::InvalidAddress(next_hop.to_string()))?;
        Ok(ForwardingEntry { network, next_hop })
    }

    pub fn prefix_len(&self) -> u8 {
        self.network.prefix_len()
    }

    pub fn contains(&self, addr: &Ipv4Addr) -> bool {
        self.network.contains(addr)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ForwardingTable {
    entries: Vec<ForwardingEntry>,
}

impl ForwardingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(cidr, next_hop)` string pairs.
    ///
    /// Fails on the first entry that does not parse; nothing is installed
    /// in that case.
    pub fn from_pairs<S: AsRef<str>>(pairs: &[(S, S)]) -> Result<Self, IpError> {
        let entries = pairs
            .iter()
            .map(|(cidr, next_hop)| ForwardingEntry::parse(cidr.as_ref(), next_hop.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_entries(entries))
    }

    /// Build a table from parsed entries.
    ///
    /// The sort is stable: among equal prefix lengths the earlier entry wins.
    pub fn from_entries(mut entries: Vec<ForwardingEntry>) -> Self {
        entries.sort_by(|a, b| b.prefix_len().cmp(&a.prefix_len()));
        ForwardingTable { entries }
    }

    /// Resolve the next hop for `dst` by longest-prefix match.
    pub fn resolve(&self, dst: Ipv4Addr) -> Option<Ipv4Addr> {
        let entry = self.entries.iter().find(|entry| entry.contains(&dst))?;
        trace!(%dst, network = %entry.network, next_hop = %entry.next_hop, "route matched");
        Some(entry.next_hop)
    }

    pub fn entries(&self) -> &[ForwardingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
