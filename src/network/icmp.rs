//! ICMP (Internet Control Message Protocol) diagnostics
//!
//! Only the error messages a forwarding node originates are built here:
//! Time Exceeded and Destination Unreachable. Both carry an 8-byte header
//! followed by the offending datagram's IP header and first 8 payload bytes.

use byteorder::{BigEndian, ByteOrder};

use crate::network::checksum;
use crate::network::ipv4::IPV4_HEADER_LEN;

/// ICMP header length in bytes
pub const ICMP_HEADER_LEN: usize = 8;

/// Bytes of the offending datagram quoted in an error message
pub const ICMP_QUOTE_LEN: usize = IPV4_HEADER_LEN + 8;

/// ICMP message types
pub const ICMP_TYPE_DEST_UNREACHABLE: u8 = 3;
pub const ICMP_TYPE_TIME_EXCEEDED: u8 = 11;

/// Time Exceeded code: TTL expired in transit
pub const ICMP_CODE_TTL_EXCEEDED: u8 = 0;
/// Destination Unreachable code: network unreachable
pub const ICMP_CODE_NET_UNREACHABLE: u8 = 0;

/// ICMP packet header structure
///
/// Represents the standard 8-byte ICMP header as defined in RFC 792
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IcmpHeader {
    pub msg_type: u8,
    pub msg_code: u8,
    pub checksum: u16,
    pub rest: [u8; 4], // unused for error messages
}

impl IcmpHeader {
    /// Header for an error message; checksum and trailing field are zero.
    pub fn error(msg_type: u8, msg_code: u8) -> Self {
        IcmpHeader {
            msg_type,
            msg_code,
            checksum: 0,
            rest: [0; 4],
        }
    }

    /// Parse ICMP header from byte slice
    ///
    /// Returns None if the data is too short to contain a valid ICMP header
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < ICMP_HEADER_LEN {
            return None;
        }

        Some(IcmpHeader {
            msg_type: data[0],
            msg_code: data[1],
            checksum: BigEndian::read_u16(&data[2..4]),
            rest: [data[4], data[5], data[6], data[7]],
        })
    }

    pub fn to_bytes(&self) -> [u8; ICMP_HEADER_LEN] {
        let mut bytes = [0u8; ICMP_HEADER_LEN];
        bytes[0] = self.msg_type;
        bytes[1] = self.msg_code;
        BigEndian::write_u16(&mut bytes[2..4], self.checksum);
        bytes[4..8].copy_from_slice(&self.rest);
        bytes
    }

    /// True for message types that report an error about another datagram.
    pub fn is_error(&self) -> bool {
        matches!(
            self.msg_type,
            ICMP_TYPE_DEST_UNREACHABLE | ICMP_TYPE_TIME_EXCEEDED
        )
    }
}

pub struct IcmpUtils {}

impl IcmpUtils {
    /// Build a complete ICMP error message about `original`.
    ///
    /// The message quotes the first [`ICMP_QUOTE_LEN`] bytes of the original
    /// datagram (fewer if it is shorter). The checksum covers the ICMP header
    /// and the quote, computed with the checksum field zeroed.
    pub fn create_error_message(msg_type: u8, msg_code: u8, original: &[u8]) -> Vec<u8> {
        let quote = &original[..original.len().min(ICMP_QUOTE_LEN)];

        let mut header = IcmpHeader::error(msg_type, msg_code);
        let mut message = Vec::with_capacity(ICMP_HEADER_LEN + quote.len());
        message.extend_from_slice(&header.to_bytes());
        message.extend_from_slice(quote);

        header.checksum = checksum(&message);
        message[..ICMP_HEADER_LEN].copy_from_slice(&header.to_bytes());
        message
    }

    /// True if `payload` of an ICMP datagram is itself an error message.
    pub fn is_error_message(payload: &[u8]) -> bool {
        IcmpHeader::from_bytes(payload).is_some_and(|header| header.is_error())
    }
}
