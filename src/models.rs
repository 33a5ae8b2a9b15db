//! Data structures for representing corpus records, captured frames and protocol headers.
mod protocols;
mod record;

pub use protocols::*;
pub use record::*;
