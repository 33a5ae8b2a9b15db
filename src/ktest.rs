//! Read and write KLEE ktest files.
//!
//! A ktest file stores the concrete inputs of a test case generated by KLEE.
//! All integers are big-endian `u32` and all strings are length-prefixed:
//!
//! ```text
//! magic ("KTEST" or "BOUT\n")
//! version
//! num_args, { len, arg }*
//! sym_argvs, sym_argv_len          (version >= 2)
//! num_objects, { len, name, num_bytes, bytes }*
//! ```
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use crate::error::KTestError;
use crate::models::CorpusRecord;

pub const KTEST_MAGIC: &[u8; 5] = b"KTEST";
/// Magic of the files written by older versions of KLEE.
pub const BOUT_MAGIC: &[u8; 5] = b"BOUT\n";
/// The most recent version of the format, used when writing.
pub const KTEST_VERSION: u32 = 3;

/// The contents of a ktest file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KTest {
    pub version: u32,
    pub args: Vec<String>,
    pub sym_argvs: u32,
    pub sym_argv_len: u32,
    pub objects: Vec<CorpusRecord>,
}

impl KTest {
    pub fn new(objects: Vec<CorpusRecord>) -> Self {
        KTest {
            version: KTEST_VERSION,
            args: Vec::new(),
            sym_argvs: 0,
            sym_argv_len: 0,
            objects,
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, KTestError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, KTestError> {
        let mut magic = [0u8; 5];
        reader.read_exact(&mut magic)?;
        if &magic != KTEST_MAGIC && &magic != BOUT_MAGIC {
            return Err(KTestError::BadMagic(magic));
        }

        let version = read_u32(&mut reader)?;
        if version > KTEST_VERSION {
            return Err(KTestError::UnsupportedVersion(version));
        }

        let num_args = read_u32(&mut reader)?;
        let mut args = Vec::new();
        for _ in 0..num_args {
            args.push(read_string(&mut reader)?);
        }

        let (sym_argvs, sym_argv_len) = if version >= 2 {
            (read_u32(&mut reader)?, read_u32(&mut reader)?)
        } else {
            (0, 0)
        };

        let num_objects = read_u32(&mut reader)?;
        let mut objects = Vec::new();
        for _ in 0..num_objects {
            let name = read_string(&mut reader)?;
            let bytes = read_bytes(&mut reader)?;
            objects.push(CorpusRecord { name, bytes });
        }

        Ok(KTest {
            version,
            args,
            sym_argvs,
            sym_argv_len,
            objects,
        })
    }

    pub fn to_file(&self, path: &Path) -> Result<(), KTestError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write the file in the current format version.
    pub fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), KTestError> {
        writer.write_all(KTEST_MAGIC)?;
        write_u32(&mut writer, KTEST_VERSION)?;
        write_u32(&mut writer, self.args.len() as u32)?;
        for arg in &self.args {
            write_bytes(&mut writer, arg.as_bytes())?;
        }
        write_u32(&mut writer, self.sym_argvs)?;
        write_u32(&mut writer, self.sym_argv_len)?;
        write_u32(&mut writer, self.objects.len() as u32)?;
        for object in &self.objects {
            write_bytes(&mut writer, object.name.as_bytes())?;
            write_bytes(&mut writer, &object.bytes)?;
        }
        Ok(())
    }
}

fn read_u32<R: Read>(reader: &mut R) -> Result<u32, KTestError> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

fn read_bytes<R: Read>(reader: &mut R) -> Result<Vec<u8>, KTestError> {
    let len = read_u32(reader)? as u64;
    // Do not trust the length for the allocation, a corrupted file could declare 4GB.
    let mut bytes = Vec::new();
    reader.by_ref().take(len).read_to_end(&mut bytes)?;
    if bytes.len() as u64 != len {
        return Err(KTestError::Io(ErrorKind::UnexpectedEof.into()));
    }
    Ok(bytes)
}

fn read_string<R: Read>(reader: &mut R) -> Result<String, KTestError> {
    let bytes = read_bytes(reader)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn write_u32<W: Write>(writer: &mut W, value: u32) -> Result<(), KTestError> {
    writer.write_all(&value.to_be_bytes())?;
    Ok(())
}

fn write_bytes<W: Write>(writer: &mut W, bytes: &[u8]) -> Result<(), KTestError> {
    write_u32(writer, bytes.len() as u32)?;
    writer.write_all(bytes)?;
    Ok(())
}
