use pnet::packet::ethernet::EthernetPacket;
use pnet::packet::ip::{IpNextHeaderProtocol, IpNextHeaderProtocols};
use pnet::packet::ipv4::Ipv4Packet;
use pnet::packet::tcp::TcpPacket;
use pnet::packet::udp::UdpPacket;
use strum::Display;

/// A protocol header that the repair engine reads or writes.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum Header {
    /// 14-byte Ethernet header.
    Ethernet,
    /// 20-byte IPv4 header, without options.
    IPv4,
    /// 20-byte TCP header, without options.
    TCP,
    /// 8-byte UDP header.
    UDP,
}

impl Header {
    /// The number of bytes that must be present before any field of the header is read.
    pub fn minimum_size(self) -> usize {
        match self {
            Header::Ethernet => EthernetPacket::minimum_packet_size(),
            Header::IPv4 => Ipv4Packet::minimum_packet_size(),
            Header::TCP => TcpPacket::minimum_packet_size(),
            Header::UDP => UdpPacket::minimum_packet_size(),
        }
    }
}

/// Layer 4 protocols whose checksum is repaired.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum L4 {
    TCP,
    UDP,
}

impl L4 {
    /// Map an IP protocol number to a supported transport, if any.
    pub fn from_protocol(protocol: IpNextHeaderProtocol) -> Option<Self> {
        match protocol {
            IpNextHeaderProtocols::Tcp => Some(L4::TCP),
            IpNextHeaderProtocols::Udp => Some(L4::UDP),
            _ => None,
        }
    }
}

impl From<L4> for Header {
    fn from(value: L4) -> Self {
        match value {
            L4::TCP => Header::TCP,
            L4::UDP => Header::UDP,
        }
    }
}

impl From<L4> for u8 {
    fn from(value: L4) -> Self {
        let val: IpNextHeaderProtocol = value.into();
        val.0
    }
}

impl From<L4> for IpNextHeaderProtocol {
    fn from(value: L4) -> Self {
        match value {
            L4::TCP => IpNextHeaderProtocols::Tcp,
            L4::UDP => IpNextHeaderProtocols::Udp,
        }
    }
}
