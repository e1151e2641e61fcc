//! TUN device link layer
//!
//! A TUN device is point-to-point: the kernel takes care of getting the
//! datagram to its next hop, so the resolved next hop is only logged.

use std::io;
use std::net::Ipv4Addr;

use tracing::{debug, info, trace, warn};
use tun_tap::{Iface, Mode};

use crate::error::IpError;
use crate::iface::interface::{Disposition, NetworkInterface};
use crate::iface::link::LinkLayer;

/// MTU + some overhead
const RECV_BUF_LEN: usize = 1504;

pub struct TunLink {
    iface: Iface,
    ignore_checksum: bool,
}

impl TunLink {
    /// Create a TUN device without packet information headers.
    pub fn open(name: &str, ignore_checksum: bool) -> io::Result<Self> {
        let iface = Iface::without_packet_info(name, Mode::Tun)?;
        info!(name = iface.name(), "TUN device opened");
        Ok(TunLink {
            iface,
            ignore_checksum,
        })
    }

    pub fn name(&self) -> &str {
        self.iface.name()
    }

    /// Block until a datagram arrives and copy it into `buf`.
    pub fn recv(&self, buf: &mut [u8]) -> io::Result<usize> {
        self.iface.recv(buf)
    }
}

impl LinkLayer for TunLink {
    fn send(&mut self, datagram: &[u8], next_hop: Ipv4Addr) -> io::Result<()> {
        trace!(%next_hop, len = datagram.len(), "writing datagram to TUN");
        self.iface.send(datagram).map(|_| ())
    }

    fn ignore_checksum(&self) -> bool {
        self.ignore_checksum
    }
}

/// Run the receive loop until the device fails.
///
/// Each datagram read from the device is dispatched before the next read.
/// Only a failing read ends the loop; everything else, including a failed
/// write, is confined to the datagram that caused it.
pub fn serve(iface: &mut NetworkInterface<TunLink>) -> io::Result<()> {
    let mut buf = [0u8; RECV_BUF_LEN];
    let mut datagram_count: u64 = 0;

    loop {
        let nbytes = iface.link().recv(&mut buf)?;
        datagram_count += 1;
        handle_datagram(iface, &buf[..nbytes], datagram_count);
    }
}

/// Dispatch one datagram and log the outcome.
pub(crate) fn handle_datagram<L: LinkLayer>(
    iface: &mut NetworkInterface<L>,
    datagram: &[u8],
    datagram_count: u64,
) {
    match iface.receive(datagram) {
        Ok(Disposition::Delivered) => debug!(datagram_count, "delivered"),
        Ok(disposition) => debug!(datagram_count, ?disposition, "processed"),
        Err(IpError::Link(e)) => warn!(datagram_count, error = %e, "link write failed"),
        Err(e) => warn!(datagram_count, error = %e, "datagram dropped"),
    }
}
