#![allow(dead_code)]

use std::net::Ipv4Addr;

use ktest2pcap::models::CorpusRecord;
use pnet::packet::ethernet::{EtherTypes, MutableEthernetPacket};
use pnet::packet::ip::{IpNextHeaderProtocol, IpNextHeaderProtocols};
use pnet::packet::ipv4::MutableIpv4Packet;
use pnet::packet::tcp::{MutableTcpPacket, TcpFlags};
use pnet::packet::udp::MutableUdpPacket;
use pnet::util::MacAddr;

pub const ETHERNET_SIZE: usize = 14;

/// Build an Ethernet/IPv4 frame with invalid checksums.
///
/// TCP and UDP frames get a full transport header, other protocols get an 8-byte one.
/// `tag` is written in the IPv4 identification field to tell frames apart.
pub fn build_frame(protocol: IpNextHeaderProtocol, payload_size: usize, tag: u16) -> Vec<u8> {
    let l4_header_size = match protocol {
        IpNextHeaderProtocols::Tcp => 20,
        _ => 8,
    };
    let l3_size = 20 + l4_header_size + payload_size;
    let mut buffer = vec![0u8; ETHERNET_SIZE + l3_size];

    let mut ethernet = MutableEthernetPacket::new(&mut buffer).unwrap();
    ethernet.set_source(MacAddr::new(0x02, 0, 0, 0, 0, 0x01));
    ethernet.set_destination(MacAddr::new(0x02, 0, 0, 0, 0, 0x02));
    ethernet.set_ethertype(EtherTypes::Ipv4);

    let mut ip = MutableIpv4Packet::new(&mut buffer[ETHERNET_SIZE..]).unwrap();
    ip.set_version(4);
    ip.set_header_length(5);
    ip.set_total_length(l3_size as u16);
    ip.set_identification(tag);
    ip.set_ttl(64);
    ip.set_next_level_protocol(protocol);
    ip.set_source(Ipv4Addr::new(192, 0, 2, 1));
    ip.set_destination(Ipv4Addr::new(198, 51, 100, 7));
    ip.set_checksum(0xffff);

    let l4 = &mut buffer[ETHERNET_SIZE + 20..];
    match protocol {
        IpNextHeaderProtocols::Tcp => {
            let mut tcp = MutableTcpPacket::new(l4).unwrap();
            tcp.set_source(40000);
            tcp.set_destination(80);
            tcp.set_sequence(42);
            tcp.set_data_offset(5);
            tcp.set_flags(TcpFlags::SYN);
            tcp.set_window(65535);
            tcp.set_checksum(0xbeef);
        }
        IpNextHeaderProtocols::Udp => {
            let mut udp = MutableUdpPacket::new(l4).unwrap();
            udp.set_source(5353);
            udp.set_destination(53);
            udp.set_length((l4_header_size + payload_size) as u16);
            udp.set_checksum(0xbeef);
        }
        _ => {}
    }

    buffer
}

pub fn tcp_frame(tag: u16) -> Vec<u8> {
    build_frame(IpNextHeaderProtocols::Tcp, 0, tag)
}

pub fn marker(interface: i32) -> CorpusRecord {
    CorpusRecord::new("VIGOR_DEVICE", interface.to_le_bytes())
}

pub fn packet(frame: Vec<u8>) -> CorpusRecord {
    CorpusRecord::new("user_buf", frame)
}
