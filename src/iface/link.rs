//! Link layer seam
//!
//! The network layer hands fully formed datagrams and a resolved next hop
//! to a [`LinkLayer`]; framing and address resolution happen below it.
//! Inbound traffic flows the other way: whoever owns the link reads raw
//! datagrams and passes them to `NetworkInterface::receive`.

use std::io;
use std::net::Ipv4Addr;

pub trait LinkLayer {
    /// Transmit `datagram` toward `next_hop`.
    fn send(&mut self, datagram: &[u8], next_hop: Ipv4Addr) -> io::Result<()>;

    /// Whether inbound header checksums may be left unverified.
    fn ignore_checksum(&self) -> bool {
        false
    }
}

impl<L: LinkLayer + ?Sized> LinkLayer for Box<L> {
    fn send(&mut self, datagram: &[u8], next_hop: Ipv4Addr) -> io::Result<()> {
        (**self).send(datagram, next_hop)
    }

    fn ignore_checksum(&self) -> bool {
        (**self).ignore_checksum()
    }
}

/// A datagram handed to the link layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transmission {
    pub datagram: Vec<u8>,
    pub next_hop: Ipv4Addr,
}

/// In-memory link that queues every transmission instead of sending it.
#[derive(Debug, Default)]
pub struct LoopbackLink {
    pub ignore_checksum: bool,
    sent: Vec<Transmission>,
}

impl LoopbackLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ignore_checksum(ignore_checksum: bool) -> Self {
        LoopbackLink {
            ignore_checksum,
            sent: Vec::new(),
        }
    }

    pub fn sent(&self) -> &[Transmission] {
        &self.sent
    }

    /// Remove and return everything transmitted so far.
    pub fn drain(&mut self) -> Vec<Transmission> {
        std::mem::take(&mut self.sent)
    }
}

impl LinkLayer for LoopbackLink {
    fn send(&mut self, datagram: &[u8], next_hop: Ipv4Addr) -> io::Result<()> {
        self.sent.push(Transmission {
            datagram: datagram.to_vec(),
            next_hop,
        });
        Ok(())
    }

    fn ignore_checksum(&self) -> bool {
        self.ignore_checksum
    }
}
