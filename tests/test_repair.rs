mod common;

use common::{build_frame, tcp_frame, ETHERNET_SIZE};
use ktest2pcap::checksum::internet_checksum;
use ktest2pcap::models::L4;
use ktest2pcap::repair::{repair, RepairOutcome};
use pnet::packet::ethernet::EthernetPacket;
use pnet::packet::ip::IpNextHeaderProtocols;
use pnet::packet::ipv4::{self, Ipv4Packet, MutableIpv4Packet};
use pnet::packet::tcp::TcpPacket;
use pnet::packet::udp::UdpPacket;
use pnet::packet::Packet as _;

#[test]
fn test_repair_ipv4_tcp() {
    let mut frame = tcp_frame(1);
    assert_eq!(frame.len(), 54);
    let original = frame.clone();

    assert_eq!(repair(&mut frame), Ok(RepairOutcome::Transport(L4::TCP)));

    let ethernet = EthernetPacket::new(&frame).unwrap();
    let ip = Ipv4Packet::new(ethernet.payload()).unwrap();
    assert_eq!(ip.get_checksum(), ipv4::checksum(&ip));
    assert_eq!(internet_checksum(&frame[ETHERNET_SIZE..ETHERNET_SIZE + 20]), 0);

    let tcp = TcpPacket::new(ip.payload()).unwrap();
    assert_eq!(tcp.get_checksum(), 0);
    assert_eq!(tcp.get_source(), 40000);
    assert_eq!(tcp.get_sequence(), 42);

    // Only the checksum fields are written.
    for (i, (before, after)) in original.iter().zip(frame.iter()).enumerate() {
        if !(24..26).contains(&i) && !(50..52).contains(&i) {
            assert_eq!(before, after, "byte {} changed", i);
        }
    }
}

#[test]
fn test_repair_ipv4_udp() {
    let mut frame = build_frame(IpNextHeaderProtocols::Udp, 12, 2);

    assert_eq!(repair(&mut frame), Ok(RepairOutcome::Transport(L4::UDP)));

    let ethernet = EthernetPacket::new(&frame).unwrap();
    let ip = Ipv4Packet::new(ethernet.payload()).unwrap();
    assert_eq!(ip.get_checksum(), ipv4::checksum(&ip));

    let udp = UdpPacket::new(ip.payload()).unwrap();
    assert_eq!(udp.get_checksum(), 0);
    assert_eq!(udp.get_length(), 20);
}

#[test]
fn test_repair_ipv4_options() {
    // 4 bytes of options (NOP, NOP, NOP, EOL) between the IPv4 and UDP headers.
    let frame = build_frame(IpNextHeaderProtocols::Udp, 0, 3);
    let mut with_options = frame[..ETHERNET_SIZE + 20].to_vec();
    with_options.extend_from_slice(&[0x01, 0x01, 0x01, 0x00]);
    with_options.extend_from_slice(&frame[ETHERNET_SIZE + 20..]);
    {
        let mut ip = MutableIpv4Packet::new(&mut with_options[ETHERNET_SIZE..]).unwrap();
        ip.set_header_length(6);
        ip.set_total_length(32);
    }

    assert_eq!(
        repair(&mut with_options),
        Ok(RepairOutcome::Transport(L4::UDP))
    );
    assert_eq!(
        internet_checksum(&with_options[ETHERNET_SIZE..ETHERNET_SIZE + 24]),
        0
    );
    let ip = Ipv4Packet::new(&with_options[ETHERNET_SIZE..]).unwrap();
    assert_eq!(ip.get_checksum(), ipv4::checksum(&ip));
    // UDP checksum after the options.
    assert_eq!(&with_options[44..46], &[0, 0]);
}

#[test]
fn test_repair_idempotent() {
    for frame in [
        tcp_frame(4),
        build_frame(IpNextHeaderProtocols::Udp, 3, 5),
        build_frame(IpNextHeaderProtocols::Icmp, 0, 6),
    ] {
        let mut once = frame.clone();
        repair(&mut once).unwrap();
        let mut twice = once.clone();
        repair(&mut twice).unwrap();
        assert_eq!(once, twice);
    }
}

#[test]
fn test_repair_payload_untouched() {
    let mut frame = build_frame(IpNextHeaderProtocols::Tcp, 5, 7);
    frame[54..].copy_from_slice(b"hello");
    repair(&mut frame).unwrap();
    assert_eq!(&frame[54..], b"hello");
}

#[test]
fn test_repair_tcp_total_length_too_short() {
    let mut frame = tcp_frame(8);
    {
        let mut ip = MutableIpv4Packet::new(&mut frame[ETHERNET_SIZE..]).unwrap();
        ip.set_total_length(39);
    }
    let error = repair(&mut frame).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Truncated TCP header: IPv4 total length is 39, need 40"
    );
}

#[test]
fn test_repair_truncated_tcp() {
    let mut frame = tcp_frame(9);
    frame.truncate(53);
    let error = repair(&mut frame).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Truncated TCP header: need 54 bytes, have 53"
    );
}
