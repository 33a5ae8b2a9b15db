//! Track the virtual interface that produced the packets of a corpus.
use crate::classifier::{classify, RecordKind};
use crate::models::{CorpusRecord, InterfaceId};

/// The effect of a record on the tracked interface.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkerUpdate {
    /// The record is not an interface marker.
    Unchanged,
    /// The record is an interface marker.
    Switched { from: InterfaceId, to: InterfaceId },
    /// The record is an interface marker with less than 4 bytes, it is ignored.
    Malformed { length: usize },
}

/// Holds the interface of the most recent interface marker.
///
/// Packets seen before any marker belong to interface 0.
#[derive(Copy, Clone, Debug, Default)]
pub struct NicTracker {
    current: InterfaceId,
}

impl NicTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> InterfaceId {
        self.current
    }

    pub fn observe(&mut self, record: &CorpusRecord) -> MarkerUpdate {
        if classify(&record.name) != RecordKind::Marker {
            return MarkerUpdate::Unchanged;
        }
        // The corpus generator stores a native (x86) int.
        match record.bytes.get(..4).and_then(|b| <[u8; 4]>::try_from(b).ok()) {
            Some(bytes) => {
                let from = self.current;
                self.current = InterfaceId::from_le_bytes(bytes);
                MarkerUpdate::Switched {
                    from,
                    to: self.current,
                }
            }
            None => MarkerUpdate::Malformed {
                length: record.len(),
            },
        }
    }
}
