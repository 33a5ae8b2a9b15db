//! Convert a sequence of corpus records into captured frames.
use std::fmt::{Display, Formatter};

use anyhow::{Context, Result};
use log::{debug, info, trace};

use crate::classifier::{classify, RecordKind};
use crate::diagnostics::{Diagnostics, Severity};
use crate::models::{CaptureRecord, CorpusRecord, InterfaceId};
use crate::nic::{MarkerUpdate, NicTracker};
use crate::repair::repair;
use crate::sink::CaptureSink;

/// Number of header bytes dumped when a frame cannot be repaired.
const DUMP_SIZE: usize = 64;

pub struct ConvertLoop {
    selected_interface: InterfaceId,
    max_packets: u64,
    tracker: NicTracker,
    statistics: ConvertStatistics,
}

impl ConvertLoop {
    /// `max_packets` is the maximum number of frames to write, 0 for no limit.
    pub fn new(selected_interface: InterfaceId, max_packets: u64) -> Self {
        ConvertLoop {
            selected_interface,
            max_packets,
            tracker: NicTracker::new(),
            statistics: ConvertStatistics::default(),
        }
    }

    /// Repair and write the packets of the selected interface, in order.
    ///
    /// The sink is finished only if every record was processed, or if the
    /// packet limit was reached. A frame too short for its headers aborts the
    /// conversion. Each run starts on interface 0 with fresh statistics.
    pub fn run<T, S>(
        &mut self,
        records: T,
        sink: &mut S,
        diagnostics: &mut Diagnostics,
    ) -> Result<ConvertStatistics>
    where
        T: IntoIterator<Item = CorpusRecord>,
        S: CaptureSink + ?Sized,
    {
        self.tracker = NicTracker::new();
        self.statistics = ConvertStatistics::default();

        for (index, mut record) in records.into_iter().enumerate() {
            self.statistics.read += 1;

            match self.tracker.observe(&record) {
                MarkerUpdate::Unchanged => {}
                MarkerUpdate::Switched { from, to } => {
                    trace!("record={} interface={} previous={}", index, to, from);
                }
                MarkerUpdate::Malformed { length } => diagnostics.emit(
                    Severity::Warning,
                    &format!(
                        "Ignoring interface marker with {} bytes at record {}",
                        length, index
                    ),
                ),
            }

            match classify(&record.name) {
                RecordKind::Packet => {}
                RecordKind::Marker => {
                    self.statistics.markers += 1;
                    continue;
                }
                RecordKind::Ignored => {
                    trace!("record={} name={} filter=ignored", index, record.name);
                    self.statistics.ignored += 1;
                    continue;
                }
            }

            self.statistics.packets += 1;
            let interface = self.tracker.current();
            if interface != self.selected_interface {
                diagnostics.emit(
                    Severity::Info,
                    &format!("Skipping packet for NIC {}", interface),
                );
                self.statistics.skipped_interface += 1;
                continue;
            }

            let outcome = match repair(&mut record.bytes) {
                Ok(outcome) => outcome,
                Err(error) => {
                    debug!(
                        "record={} bytes={}",
                        index,
                        hex::encode(&record.bytes[..record.len().min(DUMP_SIZE)])
                    );
                    return Err(error)
                        .with_context(|| format!("Cannot repair record {} ({})", index, record.name));
                }
            };
            trace!(
                "record={} name={} size={} outcome={:?}",
                index,
                record.name,
                record.len(),
                outcome
            );
            if let Some(message) = outcome.diagnostic() {
                self.statistics.passed_through += 1;
                diagnostics.emit_once(Severity::Info, &message);
            }

            sink.write(CaptureRecord::from(record))
                .with_context(|| format!("Cannot write record {}", index))?;
            self.statistics.written += 1;

            if self.max_packets > 0 && self.statistics.written >= self.max_packets {
                info!("max_packets reached, exiting...");
                break;
            }
        }

        sink.finish()?;
        Ok(self.statistics)
    }

    pub fn statistics(&self) -> &ConvertStatistics {
        &self.statistics
    }
}

#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct ConvertStatistics {
    pub read: u64,
    pub markers: u64,
    pub ignored: u64,
    pub packets: u64,
    pub skipped_interface: u64,
    /// Frames written without a complete checksum repair.
    pub passed_through: u64,
    pub written: u64,
}

impl Display for ConvertStatistics {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "records_read={} markers={} ignored={} packets={} skipped_interface={} passed_through={} packets_written={}",
               self.read, self.markers, self.ignored, self.packets, self.skipped_interface, self.passed_through, self.written)
    }
}
