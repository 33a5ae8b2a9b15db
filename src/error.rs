//! Error types for ktest2pcap.
use thiserror::Error;

use crate::models::Header;

/// Errors that abort the repair of a frame, and the whole conversion with it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepairError {
    /// The buffer is too short for a header that must be read or written.
    #[error("Truncated {header} header: need {needed} bytes, have {have}")]
    TruncatedHeader {
        header: Header,
        needed: usize,
        have: usize,
    },

    /// The IPv4 total length does not cover the transport header.
    #[error("Truncated {header} header: IPv4 total length is {declared}, need {needed}")]
    TotalLengthTooShort {
        header: Header,
        needed: usize,
        declared: u16,
    },

    /// A header length field declares less than the minimum header size.
    #[error("Truncated {header} header: declared length {declared} is below {minimum}")]
    HeaderLengthTooShort {
        header: Header,
        declared: usize,
        minimum: usize,
    },
}

impl RepairError {
    /// The header that could not be repaired.
    pub fn header(&self) -> Header {
        match self {
            RepairError::TruncatedHeader { header, .. }
            | RepairError::TotalLengthTooShort { header, .. }
            | RepairError::HeaderLengthTooShort { header, .. } => *header,
        }
    }
}

/// Errors raised while loading a ktest corpus.
#[derive(Error, Debug)]
pub enum KTestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid ktest magic: {0:02x?}")]
    BadMagic([u8; 5]),

    #[error("Unsupported ktest version: {0}")]
    UnsupportedVersion(u32),
}
