/// Identifier of the virtual network interface that produced a packet.
pub type InterfaceId = i32;

/// A named byte buffer from a ktest corpus.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CorpusRecord {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl CorpusRecord {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        CorpusRecord {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A frame written to the capture.
///
/// Frames are never truncated and their timestamp is always zero,
/// so the captured and original lengths are both the length of the data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptureRecord {
    pub data: Vec<u8>,
}

impl CaptureRecord {
    pub fn captured_length(&self) -> u32 {
        self.data.len() as u32
    }

    pub fn original_length(&self) -> u32 {
        self.data.len() as u32
    }
}

impl From<CorpusRecord> for CaptureRecord {
    fn from(record: CorpusRecord) -> Self {
        CaptureRecord { data: record.bytes }
    }
}
