//! Classify corpus records by name.
use strum::Display;

/// Name of the record holding the id of the interface of the following packets.
pub const INTERFACE_MARKER_TAG: &str = "VIGOR_DEVICE";

/// Names of the records holding a raw Ethernet frame.
pub const PACKET_TAGS: [&str; 2] = ["castan_packet", "user_buf"];

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum RecordKind {
    Packet,
    Marker,
    Ignored,
}

pub fn classify(name: &str) -> RecordKind {
    if name == INTERFACE_MARKER_TAG {
        RecordKind::Marker
    } else if PACKET_TAGS.contains(&name) {
        RecordKind::Packet
    } else {
        RecordKind::Ignored
    }
}
