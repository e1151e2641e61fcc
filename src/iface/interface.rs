//! Network interface: inbound dispatch and outbound encapsulation
//!
//! Every inbound datagram is either delivered to the registered upper
//! layer (host role) or forwarded toward its next hop (router role).
//! Forwarding decrements the TTL; a datagram whose TTL runs out is
//! answered with an ICMP Time Exceeded message instead of being forwarded.
//!
//! A datagram is processed to completion before `receive` returns, so the
//! identification counter and forwarding table need no synchronisation.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use tracing::{debug, trace, warn};

use crate::error::IpError;
use crate::iface::link::LinkLayer;
use crate::iface::route::ForwardingTable;
use crate::network::icmp::{
    IcmpUtils, ICMP_CODE_NET_UNREACHABLE, ICMP_CODE_TTL_EXCEEDED, ICMP_TYPE_DEST_UNREACHABLE,
    ICMP_TYPE_TIME_EXCEEDED,
};
use crate::network::ipv4::{protocol, Ipv4Header, Ipv4Utils};

/// Upper layer receive callback: `(source, destination, payload)`.
pub type ReceiveHandler = Box<dyn FnMut(Ipv4Addr, Ipv4Addr, &[u8])>;

/// What happened to an inbound datagram that was accepted for processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Handed to the registered upper layer handler.
    Delivered,
    /// Addressed to us, but nothing consumes this protocol.
    Discarded { protocol: u8 },
    /// Sent on toward `next_hop` with its TTL decremented.
    Forwarded { next_hop: Ipv4Addr },
    /// TTL expired in transit. `next_hop` is where the Time Exceeded
    /// message went, `None` if no message could be sent.
    TimeExceeded { next_hop: Option<Ipv4Addr> },
}

/// Network interface for packet processing
pub struct NetworkInterface<L> {
    link: L,
    local_addr: Option<Ipv4Addr>,
    routes: ForwardingTable,
    receiver: Option<ReceiveHandler>,
    next_id: u16,
}

impl<L: LinkLayer> NetworkInterface<L> {
    pub fn new(link: L) -> Self {
        NetworkInterface {
            link,
            local_addr: None,
            routes: ForwardingTable::new(),
            receiver: None,
            next_id: 0,
        }
    }

    /// Set the local address from dotted-decimal notation.
    ///
    /// Datagrams addressed elsewhere are forwarded instead of delivered.
    pub fn set_local_address(&mut self, addr: &str) -> Result<(), IpError> {
        let addr =
            Ipv4Addr::from_str(addr).map_err(|_| IpError::InvalidAddress(addr.to_string()))?;
        self.local_addr = Some(addr);
        Ok(())
    }

    pub fn local_address(&self) -> Option<Ipv4Addr> {
        self.local_addr
    }

    /// Install the forwarding table from `(cidr, next_hop)` pairs.
    ///
    /// Replaces any previously installed table. On error the current
    /// table is left untouched.
    pub fn install_routes<S: AsRef<str>>(&mut self, pairs: &[(S, S)]) -> Result<(), IpError> {
        self.set_forwarding_table(ForwardingTable::from_pairs(pairs)?);
        Ok(())
    }

    pub fn set_forwarding_table(&mut self, table: ForwardingTable) {
        debug!(routes = table.len(), "forwarding table installed");
        self.routes = table;
    }

    pub fn forwarding_table(&self) -> &ForwardingTable {
        &self.routes
    }

    /// Register the upper layer handler for locally delivered TCP payloads.
    pub fn register_receiver<F>(&mut self, handler: F)
    where
        F: FnMut(Ipv4Addr, Ipv4Addr, &[u8]) + 'static,
    {
        self.receiver = Some(Box::new(handler));
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    pub fn into_link(self) -> L {
        self.link
    }

    /// Process one inbound datagram from the link layer.
    ///
    /// Errors are per-datagram: the interface stays usable afterwards.
    pub fn receive(&mut self, datagram: &[u8]) -> Result<Disposition, IpError> {
        let (header, payload) = Ipv4Header::parse(datagram).inspect_err(|e| {
            debug!(len = datagram.len(), error = %e, "dropping malformed datagram");
        })?;

        if !self.link.ignore_checksum() && !header.has_valid_checksum() {
            let expected = header.compute_checksum();
            debug!(src = %header.src(), dst = %header.dst(), "dropping datagram with bad checksum");
            return Err(IpError::BadChecksum {
                expected,
                actual: header.checksum,
            });
        }

        trace!(
            src = %header.src(),
            dst = %header.dst(),
            protocol = header.protocol,
            ttl = header.ttl,
            len = header.total_len,
            "datagram received"
        );

        if self.local_addr == Some(header.dst()) {
            Ok(self.deliver(&header, payload))
        } else {
            self.forward(&header, datagram, payload)
        }
    }

    fn deliver(&mut self, header: &Ipv4Header, payload: &[u8]) -> Disposition {
        match (header.protocol, self.receiver.as_mut()) {
            (protocol::TCP, Some(handler)) => {
                debug!(src = %header.src(), len = payload.len(), "delivering datagram locally");
                handler(header.src(), header.dst(), payload);
                Disposition::Delivered
            }
            (protocol, _) => {
                debug!(src = %header.src(), protocol, "no local consumer, discarding");
                Disposition::Discarded { protocol }
            }
        }
    }

    fn forward(
        &mut self,
        header: &Ipv4Header,
        datagram: &[u8],
        payload: &[u8],
    ) -> Result<Disposition, IpError> {
        // TTL is checked before the route lookup so that an expiring
        // datagram is reported even when its destination is unroutable.
        if header.ttl <= 1 {
            debug!(src = %header.src(), dst = %header.dst(), "TTL expired in transit");
            let next_hop = self.send_diagnostic(
                ICMP_TYPE_TIME_EXCEEDED,
                ICMP_CODE_TTL_EXCEEDED,
                header,
                datagram,
                payload,
            )?;
            return Ok(Disposition::TimeExceeded { next_hop });
        }

        let dst = header.dst();
        let Some(next_hop) = self.routes.resolve(dst) else {
            warn!(src = %header.src(), %dst, "no route for transit datagram");
            if let Err(e) = self.send_diagnostic(
                ICMP_TYPE_DEST_UNREACHABLE,
                ICMP_CODE_NET_UNREACHABLE,
                header,
                datagram,
                payload,
            ) {
                warn!(%dst, error = %e, "failed to send destination unreachable");
            }
            return Err(IpError::NoRoute(dst));
        };

        let mut forwarded = *header;
        forwarded.ttl -= 1;
        forwarded.update_checksum();

        self.link.send(&forwarded.to_datagram(payload), next_hop)?;
        debug!(%dst, %next_hop, ttl = forwarded.ttl, "datagram forwarded");
        Ok(Disposition::Forwarded { next_hop })
    }

    /// Send an ICMP error about `datagram` back to its source.
    ///
    /// Returns the next hop the message was sent to, or `None` when no
    /// message is generated: the offending datagram is itself an ICMP
    /// error, no local address is set, or its source is unroutable.
    fn send_diagnostic(
        &mut self,
        msg_type: u8,
        msg_code: u8,
        header: &Ipv4Header,
        datagram: &[u8],
        payload: &[u8],
    ) -> Result<Option<Ipv4Addr>, IpError> {
        if header.protocol == protocol::ICMP && IcmpUtils::is_error_message(payload) {
            debug!(src = %header.src(), "not answering an ICMP error with another");
            return Ok(None);
        }

        let Some(local_addr) = self.local_addr else {
            warn!(msg_type, "local address not set, cannot source ICMP message");
            return Ok(None);
        };

        let src = header.src();
        let Some(next_hop) = self.routes.resolve(src) else {
            warn!(%src, msg_type, "no route back to source for ICMP message");
            return Ok(None);
        };

        // Quote only the datagram itself, never trailing link padding
        let datagram = &datagram[..header.total_len as usize];
        let message = IcmpUtils::create_error_message(msg_type, msg_code, datagram);
        let reply = Ipv4Header::new_simple(protocol::ICMP, header.id, local_addr, src, 0);
        let reply = Ipv4Utils::create_packet_with_payload(&reply, &message)?;

        self.link.send(&reply, next_hop)?;
        debug!(%src, %next_hop, msg_type, msg_code, "ICMP error sent");
        Ok(Some(next_hop))
    }

    /// Encapsulate a transport segment and send it to `dst`.
    pub fn send(&mut self, segment: &[u8], dst: Ipv4Addr) -> Result<(), IpError> {
        self.send_datagram(protocol::TCP, segment, dst)
    }

    /// Encapsulate `payload` under `protocol` and send it to `dst`.
    ///
    /// Each datagram built takes the next identification value.
    pub fn send_datagram(
        &mut self,
        protocol: u8,
        payload: &[u8],
        dst: Ipv4Addr,
    ) -> Result<(), IpError> {
        let src = self.local_addr.ok_or(IpError::AddressNotSet)?;
        let next_hop = self.routes.resolve(dst).ok_or_else(|| {
            warn!(%dst, "no route to host");
            IpError::NoRoute(dst)
        })?;

        let id = self.next_id.wrapping_add(1);
        let header = Ipv4Header::new_simple(protocol, id, src, dst, 0);
        let datagram = Ipv4Utils::create_packet_with_payload(&header, payload)?;
        self.next_id = id;

        self.link.send(&datagram, next_hop)?;
        trace!(%dst, %next_hop, id, len = datagram.len(), "datagram sent");
        Ok(())
    }
}

impl<L> fmt::Debug for NetworkInterface<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkInterface")
            .field("local_addr", &self.local_addr)
            .field("routes", &self.routes)
            .field("receiver", &self.receiver.is_some())
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iface::link::LoopbackLink;
    use crate::network::icmp::{IcmpHeader, ICMP_HEADER_LEN};
    use crate::network::{verify_checksum, IPV4_HEADER_LEN};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Received = Rc<RefCell<Vec<(Ipv4Addr, Ipv4Addr, Vec<u8>)>>>;

    fn addr(s: &str) -> Ipv4Addr {
        s.parse().unwrap()
    }

    fn datagram(src: &str, dst: &str, protocol: u8, ttl: u8, payload: &[u8]) -> Vec<u8> {
        let mut header =
            Ipv4Header::new_simple(protocol, 42, addr(src), addr(dst), payload.len() as u16);
        header.ttl = ttl;
        header.update_checksum();
        header.to_datagram(payload)
    }

    fn router() -> NetworkInterface<LoopbackLink> {
        let mut iface = NetworkInterface::new(LoopbackLink::new());
        iface.set_local_address("10.0.0.1").unwrap();
        iface
            .install_routes(&[
                ("10.0.0.0/24", "10.0.0.2"),
                ("172.16.0.0/12", "10.0.0.3"),
            ])
            .unwrap();
        iface
    }

    fn capture(iface: &mut NetworkInterface<LoopbackLink>) -> Received {
        let received: Received = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&received);
        iface.register_receiver(move |src, dst, payload| {
            sink.borrow_mut().push((src, dst, payload.to_vec()));
        });
        received
    }

    #[test]
    fn test_local_tcp_delivery() {
        let mut iface = router();
        let received = capture(&mut iface);

        let packet = datagram("10.0.0.9", "10.0.0.1", protocol::TCP, 10, b"segment");
        assert_eq!(iface.receive(&packet).unwrap(), Disposition::Delivered);

        let received = received.borrow();
        assert_eq!(received.len(), 1);
        assert_eq!(
            received[0],
            (addr("10.0.0.9"), addr("10.0.0.1"), b"segment".to_vec())
        );
        assert!(iface.link().sent().is_empty());
    }

    #[test]
    fn test_local_delivery_ignores_ttl() {
        let mut iface = router();
        let received = capture(&mut iface);

        let packet = datagram("10.0.0.9", "10.0.0.1", protocol::TCP, 1, b"x");
        assert_eq!(iface.receive(&packet).unwrap(), Disposition::Delivered);
        assert_eq!(received.borrow().len(), 1);
        assert!(iface.link().sent().is_empty());
    }

    #[test]
    fn test_local_non_tcp_discarded() {
        let mut iface = router();
        let received = capture(&mut iface);

        let packet = datagram("10.0.0.9", "10.0.0.1", protocol::UDP, 10, b"dgram");
        assert_eq!(
            iface.receive(&packet).unwrap(),
            Disposition::Discarded {
                protocol: protocol::UDP
            }
        );
        assert!(received.borrow().is_empty());
        assert!(iface.link().sent().is_empty());
    }

    #[test]
    fn test_local_tcp_without_handler_discarded() {
        let mut iface = router();
        let packet = datagram("10.0.0.9", "10.0.0.1", protocol::TCP, 10, b"x");
        assert_eq!(
            iface.receive(&packet).unwrap(),
            Disposition::Discarded {
                protocol: protocol::TCP
            }
        );
    }

    #[test]
    fn test_forward_decrements_ttl() {
        let mut iface = router();
        let received = capture(&mut iface);

        let packet = datagram("10.0.0.9", "172.20.1.1", protocol::TCP, 5, b"payload");
        assert_eq!(
            iface.receive(&packet).unwrap(),
            Disposition::Forwarded {
                next_hop: addr("10.0.0.3")
            }
        );
        assert!(received.borrow().is_empty());

        let sent = iface.link_mut().drain();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].next_hop, addr("10.0.0.3"));

        let (header, payload) = Ipv4Header::parse(&sent[0].datagram).unwrap();
        assert_eq!(header.ttl, 4);
        assert!(header.has_valid_checksum());
        assert_eq!(header.src(), addr("10.0.0.9"));
        assert_eq!(header.dst(), addr("172.20.1.1"));
        assert_eq!(header.id, 42);
        assert_eq!(payload, b"payload");
    }

    #[test]
    fn test_forward_preserves_other_fields() {
        let mut iface = router();
        let mut header = Ipv4Header::new_simple(
            protocol::UDP,
            7,
            addr("10.0.0.9"),
            addr("10.0.0.50"),
            3,
        );
        header.dscp_ecn = 0x2e;
        header.flags_frag_offset = 0x4000;
        header.update_checksum();
        let packet = header.to_datagram(&[1, 2, 3]);

        iface.receive(&packet).unwrap();
        let sent = iface.link_mut().drain();
        let (forwarded, _) = Ipv4Header::parse(&sent[0].datagram).unwrap();
        assert_eq!(forwarded.dscp_ecn, 0x2e);
        assert_eq!(forwarded.flags_frag_offset, 0x4000);
        assert_eq!(forwarded.protocol, protocol::UDP);
        assert_eq!(forwarded.total_len, header.total_len);
        assert_eq!(forwarded.ttl, header.ttl - 1);
    }

    #[test]
    fn test_ttl_one_generates_time_exceeded() {
        let mut iface = router();
        let packet = datagram("172.16.5.5", "10.0.0.77", protocol::TCP, 1, &[0xaa; 16]);

        assert_eq!(
            iface.receive(&packet).unwrap(),
            Disposition::TimeExceeded {
                next_hop: Some(addr("10.0.0.3"))
            }
        );

        let sent = iface.link_mut().drain();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].next_hop, addr("10.0.0.3"));

        let (header, icmp) = Ipv4Header::parse(&sent[0].datagram).unwrap();
        assert_eq!(header.protocol, protocol::ICMP);
        assert_eq!(header.ttl, 64);
        assert_eq!(header.src(), addr("10.0.0.1"));
        assert_eq!(header.dst(), addr("172.16.5.5"));
        assert_eq!(header.id, 42);
        assert!(header.has_valid_checksum());
        assert_eq!(header.total_len as usize, IPV4_HEADER_LEN + ICMP_HEADER_LEN + 28);

        let icmp_header = IcmpHeader::from_bytes(icmp).unwrap();
        assert_eq!(icmp_header.msg_type, ICMP_TYPE_TIME_EXCEEDED);
        assert_eq!(icmp_header.msg_code, 0);
        assert!(verify_checksum(icmp));
        assert_eq!(&icmp[ICMP_HEADER_LEN..], &packet[..28]);
    }

    #[test]
    fn test_ttl_zero_also_expires() {
        let mut iface = router();
        let packet = datagram("10.0.0.9", "172.16.0.1", protocol::TCP, 0, b"x");
        assert!(matches!(
            iface.receive(&packet).unwrap(),
            Disposition::TimeExceeded { next_hop: Some(_) }
        ));
        assert_eq!(iface.link().sent().len(), 1);
    }

    #[test]
    fn test_time_exceeded_without_route_to_source() {
        let mut iface = router();
        let packet = datagram("8.8.4.4", "10.0.0.20", protocol::TCP, 1, b"x");
        assert_eq!(
            iface.receive(&packet).unwrap(),
            Disposition::TimeExceeded { next_hop: None }
        );
        assert!(iface.link().sent().is_empty());
    }

    #[test]
    fn test_no_time_exceeded_for_icmp_error() {
        let mut iface = router();
        let error = IcmpUtils::create_error_message(ICMP_TYPE_TIME_EXCEEDED, 0, &[0x45; 28]);
        let packet = datagram("10.0.0.9", "172.16.0.1", protocol::ICMP, 1, &error);

        assert_eq!(
            iface.receive(&packet).unwrap(),
            Disposition::TimeExceeded { next_hop: None }
        );
        assert!(iface.link().sent().is_empty());
    }

    #[test]
    fn test_no_route_sends_unreachable() {
        let mut iface = router();
        let packet = datagram("10.0.0.9", "8.8.8.8", protocol::TCP, 5, b"x");

        let err = iface.receive(&packet).unwrap_err();
        assert!(matches!(err, IpError::NoRoute(dst) if dst == addr("8.8.8.8")));

        let sent = iface.link_mut().drain();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].next_hop, addr("10.0.0.2"));
        let (header, icmp) = Ipv4Header::parse(&sent[0].datagram).unwrap();
        assert_eq!(header.dst(), addr("10.0.0.9"));
        assert_eq!(icmp[0], ICMP_TYPE_DEST_UNREACHABLE);
    }

    #[test]
    fn test_no_route_either_way_drops_silently() {
        let mut iface = router();
        let packet = datagram("8.8.4.4", "8.8.8.8", protocol::TCP, 5, b"x");
        assert!(matches!(iface.receive(&packet), Err(IpError::NoRoute(_))));
        assert!(iface.link().sent().is_empty());
    }

    struct DownLink;

    impl LinkLayer for DownLink {
        fn send(&mut self, _datagram: &[u8], _next_hop: Ipv4Addr) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "link down"))
        }
    }

    #[test]
    fn test_no_route_reported_when_unreachable_send_fails() {
        let mut iface = NetworkInterface::new(DownLink);
        iface.set_local_address("10.0.0.1").unwrap();
        iface.install_routes(&[("10.0.0.0/24", "10.0.0.2")]).unwrap();

        let packet = datagram("10.0.0.9", "8.8.8.8", protocol::TCP, 5, b"x");
        assert!(matches!(
            iface.receive(&packet),
            Err(IpError::NoRoute(dst)) if dst == addr("8.8.8.8")
        ));
    }

    #[test]
    fn test_time_exceeded_quote_excludes_link_padding() {
        let mut iface = router();
        let mut packet = datagram("10.0.0.9", "172.16.0.1", protocol::TCP, 1, &[1, 2]);
        let datagram_len = packet.len();
        packet.extend_from_slice(&[0xee; 10]);

        iface.receive(&packet).unwrap();
        let sent = iface.link_mut().drain();
        let (_, icmp) = Ipv4Header::parse(&sent[0].datagram).unwrap();

        assert_eq!(datagram_len, 22);
        assert_eq!(icmp.len(), ICMP_HEADER_LEN + 22);
        assert_eq!(&icmp[ICMP_HEADER_LEN..], &packet[..22]);
        assert!(verify_checksum(icmp));
    }

    #[test]
    fn test_bad_checksum_rejected() {
        let mut iface = router();
        let received = capture(&mut iface);
        let mut packet = datagram("10.0.0.9", "10.0.0.1", protocol::TCP, 10, b"x");
        packet[10] ^= 0xff;

        assert!(matches!(
            iface.receive(&packet),
            Err(IpError::BadChecksum { .. })
        ));
        assert!(received.borrow().is_empty());
    }

    #[test]
    fn test_bad_checksum_accepted_when_link_ignores_it() {
        let mut iface = NetworkInterface::new(LoopbackLink::with_ignore_checksum(true));
        iface.set_local_address("10.0.0.1").unwrap();
        let received = capture(&mut iface);

        let mut packet = datagram("10.0.0.9", "10.0.0.1", protocol::TCP, 10, b"x");
        packet[10] = 0;
        packet[11] = 0;
        assert_eq!(iface.receive(&packet).unwrap(), Disposition::Delivered);
        assert_eq!(received.borrow().len(), 1);
    }

    #[test]
    fn test_malformed_does_not_poison_interface() {
        let mut iface = router();
        let received = capture(&mut iface);

        assert!(matches!(
            iface.receive(&[0x45, 0x00, 0x00]),
            Err(IpError::TooShort { .. })
        ));

        let packet = datagram("10.0.0.9", "10.0.0.1", protocol::TCP, 10, b"ok");
        assert_eq!(iface.receive(&packet).unwrap(), Disposition::Delivered);
        assert_eq!(received.borrow().len(), 1);
    }

    #[test]
    fn test_send_builds_datagram() {
        let mut iface = router();
        iface.send(b"segment", addr("10.0.0.20")).unwrap();
        iface.send(b"again", addr("172.16.1.1")).unwrap();

        let sent = iface.link_mut().drain();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].next_hop, addr("10.0.0.2"));
        assert_eq!(sent[1].next_hop, addr("10.0.0.3"));

        let (first, payload) = Ipv4Header::parse(&sent[0].datagram).unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(first.ttl, 64);
        assert_eq!(first.protocol, protocol::TCP);
        assert_eq!(first.total_len, 27);
        assert_eq!(first.src(), addr("10.0.0.1"));
        assert_eq!(first.dst(), addr("10.0.0.20"));
        assert!(first.has_valid_checksum());
        assert_eq!(payload, b"segment");

        let (second, _) = Ipv4Header::parse(&sent[1].datagram).unwrap();
        assert_eq!(second.id, 2);
    }

    #[test]
    fn test_send_without_route_fails() {
        let mut iface = router();
        let err = iface.send(b"x", addr("8.8.8.8")).unwrap_err();
        assert!(matches!(err, IpError::NoRoute(_)));
        assert!(iface.link().sent().is_empty());

        // A failed send does not consume an identifier
        iface.send(b"x", addr("10.0.0.5")).unwrap();
        let (header, _) = Ipv4Header::parse(&iface.link().sent()[0].datagram).unwrap();
        assert_eq!(header.id, 1);
    }

    #[test]
    fn test_send_without_local_address_fails() {
        let mut iface = NetworkInterface::new(LoopbackLink::new());
        iface.install_routes(&[("0.0.0.0/0", "10.0.0.2")]).unwrap();
        assert!(matches!(
            iface.send(b"x", addr("8.8.8.8")),
            Err(IpError::AddressNotSet)
        ));
    }

    #[test]
    fn test_identifier_wraps() {
        let mut iface = router();
        iface.next_id = u16::MAX;
        iface.send(b"x", addr("10.0.0.5")).unwrap();
        let (header, _) = Ipv4Header::parse(&iface.link().sent()[0].datagram).unwrap();
        assert_eq!(header.id, 0);
    }

    #[test]
    fn test_invalid_configuration_rejected() {
        let mut iface = router();
        assert!(matches!(
            iface.set_local_address("10.0.0.256"),
            Err(IpError::InvalidAddress(_))
        ));
        assert_eq!(iface.local_address(), Some(addr("10.0.0.1")));

        assert!(iface.install_routes(&[("bogus", "10.0.0.2")]).is_err());
        assert_eq!(iface.forwarding_table().len(), 2);
    }

    #[test]
    fn test_instances_are_independent() {
        let mut a = router();
        let mut b = router();
        a.send(b"x", addr("10.0.0.5")).unwrap();
        a.send(b"x", addr("10.0.0.5")).unwrap();
        b.send(b"x", addr("10.0.0.5")).unwrap();

        let (header, _) = Ipv4Header::parse(&b.link().sent()[0].datagram).unwrap();
        assert_eq!(header.id, 1);
    }
}
