//! Write repaired frames to a capture.
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, warn};
use pcap::{Capture, Dead, Linktype, Packet, PacketHeader, Savefile};

use crate::models::CaptureRecord;

/// A destination for captured frames.
pub trait CaptureSink {
    fn write(&mut self, record: CaptureRecord) -> Result<()>;

    /// Called once after the last frame of a successful conversion.
    fn finish(&mut self) -> Result<()>;
}

impl CaptureSink for Vec<CaptureRecord> {
    fn write(&mut self, record: CaptureRecord) -> Result<()> {
        self.push(record);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A pcap file with the Ethernet link type.
///
/// A sink dropped before [`CaptureSink::finish`] is called removes its file,
/// an aborted conversion must not leave a capture that looks complete.
pub struct PcapSink {
    path: PathBuf,
    // The savefile must be closed before the handle.
    savefile: Option<Savefile>,
    _handle: Capture<Dead>,
    finished: bool,
}

impl PcapSink {
    pub fn create(path: &Path) -> Result<Self> {
        let handle = Capture::dead(Linktype::ETHERNET).context("Cannot open pcap handle")?;
        let savefile = handle
            .savefile(path)
            .with_context(|| format!("Error opening pcap file {}", path.display()))?;
        Ok(PcapSink {
            path: path.to_path_buf(),
            savefile: Some(savefile),
            _handle: handle,
            finished: false,
        })
    }
}

impl CaptureSink for PcapSink {
    fn write(&mut self, record: CaptureRecord) -> Result<()> {
        let savefile = self
            .savefile
            .as_mut()
            .context("pcap file is already closed")?;
        // Symbolic packets have no meaningful capture time.
        let header = PacketHeader {
            ts: libc::timeval {
                tv_sec: 0,
                tv_usec: 0,
            },
            caplen: record.captured_length(),
            len: record.original_length(),
        };
        savefile.write(&Packet::new(&header, &record.data));
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(mut savefile) = self.savefile.take() {
            savefile
                .flush()
                .with_context(|| format!("Error writing pcap file {}", self.path.display()))?;
        }
        self.finished = true;
        Ok(())
    }
}

impl Drop for PcapSink {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        drop(self.savefile.take());
        match fs::remove_file(&self.path) {
            Ok(_) => debug!("Removed incomplete pcap file {}", self.path.display()),
            Err(error) => warn!(
                "Cannot remove incomplete pcap file {}: {}",
                self.path.display(),
                error
            ),
        }
    }
}
