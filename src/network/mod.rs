//! Network layer protocols implementation
//!
//! This module contains the wire formats handled by the forwarding engine:
//! - IPv4: fixed 20-byte Internet Protocol header
//! - ICMP: diagnostic messages sent back toward a datagram's source

pub mod icmp;
pub mod ipv4;

pub use icmp::{IcmpHeader, ICMP_TYPE_DEST_UNREACHABLE, ICMP_TYPE_TIME_EXCEEDED};
pub use ipv4::{protocol, Ipv4Header, IPV4_HEADER_LEN};

/// Calculate Internet checksum
///
/// Sums the data as 16-bit big-endian words, folds every carry back into
/// the low 16 bits and returns the one's complement of the result.
/// Running it over a header that already carries a correct checksum yields zero.
pub fn checksum(data: &[u8]) -> u16 {
    let mut sum = 0u32;

    for chunk in data.chunks_exact(2) {
        sum += u16::from_be_bytes([chunk[0], chunk[1]]) as u32;
    }

    // Odd trailing byte is padded with zero
    if data.len() % 2 != 0 {
        if let Some(&last_byte) = data.last() {
            sum += (last_byte as u32) << 8;
        }
    }

    while (sum >> 16) > 0 {
        sum = (sum & 0xFFFF) + (sum >> 16);
    }

    !sum as u16
}

/// Returns true if `data` (checksum field included) sums to zero.
pub fn verify_checksum(data: &[u8]) -> bool {
    checksum(data) == 0
}
