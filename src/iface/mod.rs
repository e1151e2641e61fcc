//! Network interface abstraction layer
//!
//! This module provides the packet processing side of the stack:
//! - Forwarding table and next hop resolution
//! - Host/router dispatch of inbound datagrams
//! - Encapsulation of locally originated segments
//! - The link layer seam and a TUN-backed link

pub mod interface;
pub mod link;
pub mod route;
pub mod tun;

pub use interface::{Disposition, NetworkInterface, ReceiveHandler};
pub use link::{LinkLayer, LoopbackLink, Transmission};
pub use route::{ForwardingEntry, ForwardingTable};
pub use tun::TunLink;
