//! Network layer error types.

use std::io;
use std::net::Ipv4Addr;

#[derive(Debug, thiserror::Error)]
pub enum IpError {
    #[error("datagram too short: need {min} bytes, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("malformed datagram: {0}")]
    Malformed(&'static str),

    #[error("header checksum mismatch: expected {expected:#06x}, got {actual:#06x}")]
    BadChecksum { expected: u16, actual: u16 },

    #[error("no route to host: {0}")]
    NoRoute(Ipv4Addr),

    #[error("invalid IPv4 address: {0}")]
    InvalidAddress(String),

    #[error("invalid CIDR block: {0}")]
    InvalidCidr(String),

    #[error("local address has not been configured")]
    AddressNotSet,

    #[error("link layer error: {0}")]
    Link(#[from] io::Error),
}
