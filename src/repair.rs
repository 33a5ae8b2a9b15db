//! Repair the checksums of Ethernet frames.
//!
//! Frames produced by symbolic execution rarely carry valid checksums.
//! The IPv4 header checksum is recomputed and the TCP and UDP checksums are set to zero,
//! which lets packet analyzers dissect the capture without flagging every frame.
//!
//! Frames are parsed in place with [`pnet`] packet views. A view is only built once the
//! buffer is known to hold the whole header, and every length field read from the frame
//! is checked against the buffer before it is used as an offset.
use pnet::packet::ethernet::{EtherType, EtherTypes, EthernetPacket};
use pnet::packet::ip::IpNextHeaderProtocol;
use pnet::packet::ipv4::MutableIpv4Packet;
use pnet::packet::tcp::MutableTcpPacket;
use pnet::packet::udp::MutableUdpPacket;
use pnet::packet::Packet as _;

use crate::checksum::internet_checksum;
use crate::error::RepairError;
use crate::models::{Header, L4};

/// What [`repair`] did to a frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RepairOutcome {
    /// The IPv4 checksum was recomputed and the transport checksum set to zero.
    Transport(L4),
    /// The IPv4 checksum was recomputed, the transport header was left untouched.
    UnsupportedTransport(IpNextHeaderProtocol),
    /// The frame does not carry IPv4 and was left untouched.
    UnsupportedEtherType(EtherType),
    /// The IP header is not IPv4 and the frame was left untouched.
    UnsupportedIpVersion(u8),
}

impl RepairOutcome {
    /// Whether the IPv4 checksum was recomputed.
    pub fn is_repaired(&self) -> bool {
        matches!(
            self,
            RepairOutcome::Transport(_) | RepairOutcome::UnsupportedTransport(_)
        )
    }

    /// A note for the frames that were not (fully) repaired.
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            RepairOutcome::Transport(_) => None,
            RepairOutcome::UnsupportedTransport(protocol) => Some(format!(
                "Packet with unsupported transport protocol: {}",
                protocol.0
            )),
            RepairOutcome::UnsupportedEtherType(ethertype) => Some(format!(
                "Packet with unsupported l3-type: {:#06x}",
                ethertype.0
            )),
            RepairOutcome::UnsupportedIpVersion(version) => {
                Some(format!("Unsupported IP version: {}", version))
            }
        }
    }
}

fn truncated(header: Header, needed: usize, have: usize) -> RepairError {
    RepairError::TruncatedHeader {
        header,
        needed,
        have,
    }
}

/// Repair the checksums of an Ethernet frame in place.
///
/// Only checksum fields are written. Frames that are not IPv4 are returned untouched.
/// An error means that the frame is too short for one of its headers.
pub fn repair(frame: &mut [u8]) -> Result<RepairOutcome, RepairError> {
    let have = frame.len();
    let l3_start = Header::Ethernet.minimum_size();

    let ethernet = EthernetPacket::new(&frame[..])
        .ok_or_else(|| truncated(Header::Ethernet, l3_start, have))?;
    let ethertype = ethernet.get_ethertype();
    if ethertype != EtherTypes::Ipv4 {
        return Ok(RepairOutcome::UnsupportedEtherType(ethertype));
    }

    let (ip_header_size, total_length, protocol) = {
        let mut ip = MutableIpv4Packet::new(&mut frame[l3_start..])
            .ok_or_else(|| truncated(Header::IPv4, l3_start + Header::IPv4.minimum_size(), have))?;

        let version = ip.get_version();
        if version != 4 {
            return Ok(RepairOutcome::UnsupportedIpVersion(version));
        }

        let ip_header_size = ip.get_header_length() as usize * 4;
        if ip_header_size < Header::IPv4.minimum_size() {
            return Err(RepairError::HeaderLengthTooShort {
                header: Header::IPv4,
                declared: ip_header_size,
                minimum: Header::IPv4.minimum_size(),
            });
        }
        // Options are part of the checksummed header.
        if have < l3_start + ip_header_size {
            return Err(truncated(Header::IPv4, l3_start + ip_header_size, have));
        }

        ip.set_checksum(0);
        let checksum = internet_checksum(&ip.packet()[..ip_header_size]);
        ip.set_checksum(checksum);

        (
            ip_header_size,
            ip.get_total_length(),
            ip.get_next_level_protocol(),
        )
    };

    let l4 = match L4::from_protocol(protocol) {
        Some(l4) => l4,
        None => return Ok(RepairOutcome::UnsupportedTransport(protocol)),
    };

    let header = Header::from(l4);
    let l4_start = l3_start + ip_header_size;
    let needed = ip_header_size + header.minimum_size();
    if have < l3_start + needed {
        return Err(truncated(header, l3_start + needed, have));
    }
    if (total_length as usize) < needed {
        return Err(RepairError::TotalLengthTooShort {
            header,
            needed,
            declared: total_length,
        });
    }

    let segment = &mut frame[l4_start..];
    match l4 {
        L4::TCP => {
            let mut tcp = MutableTcpPacket::new(segment)
                .ok_or_else(|| truncated(header, l3_start + needed, have))?;
            let data_offset = tcp.get_data_offset() as usize * 4;
            if data_offset < header.minimum_size() {
                return Err(RepairError::HeaderLengthTooShort {
                    header,
                    declared: data_offset,
                    minimum: header.minimum_size(),
                });
            }
            // Zeroed, not recomputed.
            tcp.set_checksum(0);
        }
        L4::UDP => {
            let mut udp = MutableUdpPacket::new(segment)
                .ok_or_else(|| truncated(header, l3_start + needed, have))?;
            let length = udp.get_length() as usize;
            if length < header.minimum_size() {
                return Err(RepairError::HeaderLengthTooShort {
                    header,
                    declared: length,
                    minimum: header.minimum_size(),
                });
            }
            // A zero checksum means "no checksum" for UDP over IPv4.
            udp.set_checksum(0);
        }
    }

    Ok(RepairOutcome::Transport(l4))
}
