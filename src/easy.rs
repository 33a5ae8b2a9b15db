//! High-level interface for converting ktest files.
//!
//! ```no_run
//! use std::path::PathBuf;
//! use ktest2pcap::easy::{convert, Config};
//!
//! let config = Config {
//!     input_file: PathBuf::from("test000001.ktest"),
//!     output_file: PathBuf::from("test000001.pcap"),
//!     ..Default::default()
//! };
//! let statistics = convert(&config).unwrap();
//!
//! println!("{}", statistics);
//! ```
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use crate::convert_loop::{ConvertLoop, ConvertStatistics};
use crate::diagnostics::{Diagnostics, Severity};
use crate::ktest::KTest;
use crate::models::InterfaceId;
use crate::sink::PcapSink;

/// Convert a ktest file into a pcap file.
///
/// Fatal errors are reported through the diagnostics before being returned.
pub fn convert(config: &Config) -> Result<ConvertStatistics> {
    let mut diagnostics = Diagnostics::new();
    convert_with_diagnostics(config, &mut diagnostics).map_err(|error| {
        diagnostics.emit(Severity::Error, &format!("{:#}", error));
        error
    })
}

/// Convert a ktest file into a pcap file, reporting to existing diagnostics.
pub fn convert_with_diagnostics(
    config: &Config,
    diagnostics: &mut Diagnostics,
) -> Result<ConvertStatistics> {
    info!("{}", config);

    let ktest = KTest::from_file(&config.input_file).with_context(|| {
        format!("Error loading ktest file {}", config.input_file.display())
    })?;
    info!(
        "Loaded {} objects from {} (version {})",
        ktest.objects.len(),
        config.input_file.display(),
        ktest.version
    );

    let mut sink = PcapSink::create(&config.output_file)?;
    let mut converter = ConvertLoop::new(config.interface, config.max_packets);
    let statistics = converter.run(ktest.objects, &mut sink, diagnostics)?;

    info!("{}", statistics);
    Ok(statistics)
}

/// Conversion configuration.
pub struct Config {
    /// ktest file to read.
    pub input_file: PathBuf,
    /// pcap file to write.
    pub output_file: PathBuf,
    /// Only write the packets of this interface.
    pub interface: InterfaceId,
    /// Maximum number of packets to write (0 for unlimited).
    pub max_packets: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input_file: PathBuf::new(),
            output_file: PathBuf::new(),
            interface: 0,
            max_packets: 0,
        }
    }
}

impl Display for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "input_file={:?}", self.input_file)?;
        write!(f, " output_file={:?}", self.output_file)?;
        write!(f, " interface={:?}", self.interface)?;
        write!(f, " max_packets={:?}", self.max_packets)
    }
}
