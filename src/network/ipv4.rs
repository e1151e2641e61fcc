//! IPv4 header codec
//!
//! Parses the fixed 20-byte IPv4 header into semantic fields and packs
//! those fields back into wire format. Options and fragmentation are not
//! supported: the header length is always five 32-bit words and the
//! flags/fragment-offset field is carried through untouched.

use std::net::Ipv4Addr;

use byteorder::{BigEndian, ByteOrder};

use crate::error::IpError;
use crate::network::checksum;

pub const IPV4_HEADER_LEN: usize = 20;
const IPV4_VERSION: u8 = 4;
const IHL_WORDS: u8 = 5; // 5 * 4 = 20 bytes, no options
pub const DEFAULT_TTL: u8 = 64;

/// IPv4 packet header structure
///
/// Version and header length are constants and therefore not stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Header {
    pub dscp_ecn: u8,
    pub total_len: u16,
    pub id: u16,
    pub flags_frag_offset: u16,
    pub ttl: u8,
    pub protocol: u8,
    pub checksum: u16,
    pub src_addr: [u8; 4],
    pub dst_addr: [u8; 4],
}

impl Ipv4Header {
    /// Create a header for a locally originated datagram.
    ///
    /// DSCP/ECN and flags are zero, TTL is [`DEFAULT_TTL`] and the checksum
    /// is left at zero until [`Ipv4Header::update_checksum`] is called.
    pub fn new_simple(
        protocol: u8,
        id: u16,
        src_addr: Ipv4Addr,
        dst_addr: Ipv4Addr,
        payload_len: u16,
    ) -> Self {
        Ipv4Header {
            dscp_ecn: 0,
            total_len: IPV4_HEADER_LEN as u16 + payload_len,
            id,
            flags_frag_offset: 0,
            ttl: DEFAULT_TTL,
            protocol,
            checksum: 0,
            src_addr: src_addr.octets(),
            dst_addr: dst_addr.octets(),
        }
    }

    /// Parse a datagram into its header and payload.
    ///
    /// The payload is the bytes between the fixed header and the declared
    /// total length; anything past the total length is link padding and is
    /// ignored.
    pub fn parse(data: &[u8]) -> Result<(Self, &[u8]), IpError> {
        if data.len() < IPV4_HEADER_LEN {
            return Err(IpError::TooShort {
                min: IPV4_HEADER_LEN,
                actual: data.len(),
            });
        }

        if data[0] >> 4 != IPV4_VERSION {
            return Err(IpError::Malformed("not an IPv4 datagram"));
        }
        if data[0] & 0x0F != IHL_WORDS {
            return Err(IpError::Malformed("header options are not supported"));
        }

        let header = Ipv4Header {
            dscp_ecn: data[1],
            total_len: BigEndian::read_u16(&data[2..4]),
            id: BigEndian::read_u16(&data[4..6]),
            flags_frag_offset: BigEndian::read_u16(&data[6..8]),
            ttl: data[8],
            protocol: data[9],
            checksum: BigEndian::read_u16(&data[10..12]),
            src_addr: [data[12], data[13], data[14], data[15]],
            dst_addr: [data[16], data[17], data[18], data[19]],
        };

        let total_len = header.total_len as usize;
        if total_len < IPV4_HEADER_LEN {
            return Err(IpError::Malformed("total length shorter than header"));
        }
        if total_len > data.len() {
            return Err(IpError::TooShort {
                min: total_len,
                actual: data.len(),
            });
        }

        Ok((header, &data[IPV4_HEADER_LEN..total_len]))
    }

    /// Serialize the header with its current checksum field.
    pub fn to_bytes(&self) -> [u8; IPV4_HEADER_LEN] {
        self.to_bytes_with_checksum(self.checksum)
    }

    /// Serialize the header, writing `checksum` in place of the stored one.
    pub fn to_bytes_with_checksum(&self, checksum: u16) -> [u8; IPV4_HEADER_LEN] {
        let mut bytes = [0u8; IPV4_HEADER_LEN];
        bytes[0] = (IPV4_VERSION << 4) | IHL_WORDS;
        bytes[1] = self.dscp_ecn;
        BigEndian::write_u16(&mut bytes[2..4], self.total_len);
        BigEndian::write_u16(&mut bytes[4..6], self.id);
        BigEndian::write_u16(&mut bytes[6..8], self.flags_frag_offset);
        bytes[8] = self.ttl;
        bytes[9] = self.protocol;
        BigEndian::write_u16(&mut bytes[10..12], checksum);
        bytes[12..16].copy_from_slice(&self.src_addr);
        bytes[16..20].copy_from_slice(&self.dst_addr);
        bytes
    }

    /// Checksum of this header computed with the checksum field zeroed.
    pub fn compute_checksum(&self) -> u16 {
        checksum(&self.to_bytes_with_checksum(0))
    }

    /// Recalculate the checksum field after modifying header fields.
    pub fn update_checksum(&mut self) {
        self.checksum = self.compute_checksum();
    }

    /// Returns true if the stored checksum matches the header contents.
    pub fn has_valid_checksum(&self) -> bool {
        checksum(&self.to_bytes()) == 0
    }

    pub fn src(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.src_addr)
    }

    pub fn dst(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.dst_addr)
    }

    /// Concatenate the serialized header with `payload`.
    ///
    /// The header is written as-is; callers are responsible for a
    /// consistent total length and checksum.
    pub fn to_datagram(&self, payload: &[u8]) -> Vec<u8> {
        let mut datagram = Vec::with_capacity(IPV4_HEADER_LEN + payload.len());
        datagram.extend_from_slice(&self.to_bytes());
        datagram.extend_from_slice(payload);
        datagram
    }
}

/// IPv4 protocol constants
pub mod protocol {
    pub const ICMP: u8 = 1;
    pub const TCP: u8 = 6;
    pub const UDP: u8 = 17;
}

pub struct Ipv4Utils {}

impl Ipv4Utils {
    /// Create a complete IPv4 datagram around `payload`.
    ///
    /// Total length is set from the payload and the checksum is computed
    /// over the final header. Fails if the datagram would not fit the
    /// 16-bit total length field.
    pub fn create_packet_with_payload(
        header: &Ipv4Header,
        payload: &[u8],
    ) -> Result<Vec<u8>, IpError> {
        let total_len = u16::try_from(IPV4_HEADER_LEN + payload.len())
            .map_err(|_| IpError::Malformed("payload exceeds maximum datagram size"))?;

        let mut header = *header;
        header.total_len = total_len;
        header.update_checksum();
        Ok(header.to_datagram(payload))
    }
}
