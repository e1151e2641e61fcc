//! IPv4 forwarding and delivery engine
//!
//! The network layer of a minimal host/router stack:
//! - IPv4 header parsing, serialization and checksums
//! - Longest-prefix-match forwarding table
//! - Host/router dispatch with TTL handling and ICMP Time Exceeded
//! - Encapsulation of outbound transport segments

pub mod config;
pub mod error;
pub mod iface;
pub mod network;

// Re-export commonly used types
pub use config::StackConfig;
pub use error::IpError;
pub use iface::{Disposition, ForwardingTable, LinkLayer, LoopbackLink, NetworkInterface};
pub use network::{checksum, Ipv4Header};
