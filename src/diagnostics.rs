//! Diagnostics emitted during a conversion.
//!
//! [`Diagnostics`] forwards messages to the [`log`] facade and remembers the
//! messages emitted with [`Diagnostics::emit_once`], so that a corpus with
//! thousands of frames of the same unsupported protocol produces a single warning.
//! It is created by the caller and passed to the conversion loop.
use std::collections::HashSet;

use log::{log, Level};
use strum::Display;

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    /// A record was skipped or not fully repaired, the conversion goes on.
    Info,
    /// Something unexpected in the corpus, the conversion goes on.
    Warning,
    /// The conversion is aborted.
    Error,
}

impl From<Severity> for Level {
    fn from(value: Severity) -> Self {
        match value {
            Severity::Info => Level::Info,
            Severity::Warning => Level::Warn,
            Severity::Error => Level::Error,
        }
    }
}

#[derive(Debug, Default)]
pub struct Diagnostics {
    seen: HashSet<(Severity, String)>,
    emitted: u64,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, severity: Severity, message: &str) {
        self.emitted += 1;
        log!(Level::from(severity), "{}", message);
    }

    /// Emit the message only if it was not already emitted with this function.
    /// Returns whether the message was emitted.
    pub fn emit_once(&mut self, severity: Severity, message: &str) -> bool {
        if self.seen.insert((severity, message.to_string())) {
            self.emit(severity, message);
            true
        } else {
            false
        }
    }

    /// Number of messages emitted so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}
