//! The encoded artifact: code table plus encoded stream.
//!
//! # Layout
//!
//! All sizes are 64-bit little-endian unsigned integers. Codes and the
//! encoded stream are stored as one ASCII `'0'`/`'1'` byte per bit, so the
//! artifact is normally larger than its input.
//!
//! ```text
//! +----------------------------+
//! | entry_count (8)            |  N code table entries
//! +----------------------------+
//! | symbol (1)                 |  \
//! | code_len (8)               |   | repeated N times,
//! | code (code_len)            |   | ascending by symbol
//! +----------------------------+  /
//! | encoded_len (8)            |
//! +----------------------------+
//! | encoded stream (encoded_len)|
//! +----------------------------+
//! ```
//!
//! A bit-packed, checksummed alternative lives in [`crate::packed`]; it is
//! only produced when asked for explicitly.

use crate::bitstring::BitString;
use crate::codes::CodeTable;
use crate::error::{ArtifactError, Error, Result};
use crate::packed;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Artifact encodings understood by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Size-prefixed ASCII bits (the compatible default)
    #[default]
    Ascii,
    /// Versioned, bit-packed, CRC-protected
    Packed,
}

impl Format {
    pub fn name(&self) -> &'static str {
        match self {
            Format::Ascii => "ascii",
            Format::Packed => "packed",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ascii" => Some(Format::Ascii),
            "packed" => Some(Format::Packed),
            _ => None,
        }
    }
}

/// A parsed artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub table: CodeTable,
    pub encoded: BitString,
}

/// Serialize a code table and encoded stream into the ASCII layout.
pub fn serialize_artifact(table: &CodeTable, encoded: &BitString) -> Vec<u8> {
    let table_size: usize = table.iter().map(|(_, code)| 1 + 8 + code.len()).sum();
    let mut bytes = Vec::with_capacity(8 + table_size + 8 + encoded.len());

    bytes.extend_from_slice(&(table.len() as u64).to_le_bytes());
    for (&symbol, code) in table {
        bytes.push(symbol);
        bytes.extend_from_slice(&(code.len() as u64).to_le_bytes());
        bytes.extend_from_slice(&code.to_ascii());
    }

    bytes.extend_from_slice(&(encoded.len() as u64).to_le_bytes());
    bytes.extend_from_slice(&encoded.to_ascii());

    bytes
}

/// Write the ASCII layout to `sink`, returning the number of bytes written.
pub fn write_artifact<W: Write>(sink: &mut W, table: &CodeTable, encoded: &BitString) -> Result<usize> {
    write_bytes(sink, &serialize_artifact(table, encoded))
}

fn write_bytes<W: Write>(sink: &mut W, bytes: &[u8]) -> Result<usize> {
    sink.write_all(bytes)?;
    Ok(bytes.len())
}

/// Serialize the artifact in `format`, then create (or truncate) `path` and
/// write it. A table the format cannot represent leaves `path` untouched.
///
/// # Errors
/// - `ArtifactError::OutOfRange` if the table does not fit the packed layout
/// - `Error::SinkUnavailable` if the file cannot be opened for writing
/// - `Error::Io` if writing fails after the file was opened
pub fn save_artifact(path: &Path, format: Format, table: &CodeTable, encoded: &BitString) -> Result<usize> {
    let bytes = match format {
        Format::Ascii => serialize_artifact(table, encoded),
        Format::Packed => packed::serialize_packed(table, encoded)?,
    };

    let file = File::create(path).map_err(|source| Error::SinkUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    let written = write_bytes(&mut writer, &bytes)?;
    writer.flush()?;

    log::info!(
        "wrote {} artifact to {} ({} bytes)",
        format.name(),
        path.display(),
        written
    );
    Ok(written)
}

/// Parse an ASCII-layout artifact.
///
/// # Errors
/// - `ArtifactError::Truncated` if a field runs past the end
/// - `ArtifactError::InvalidBitChar` for a byte other than '0'/'1'
/// - `ArtifactError::DuplicateSymbol` / `EmptyCode` for a malformed table
/// - `ArtifactError::TrailingBytes` if anything follows the stream
pub fn parse_artifact(bytes: &[u8]) -> Result<Artifact> {
    let mut reader = SliceReader::new(bytes);

    let entry_count = reader.read_len("entry_count")?;
    if entry_count > 256 {
        return Err(ArtifactError::OutOfRange {
            field: "entry_count",
            value: entry_count as u64,
        }
        .into());
    }

    let mut table = CodeTable::new();
    for _ in 0..entry_count {
        let symbol = reader.read_u8("symbol")?;
        let code_len = reader.read_len("code_len")?;
        let code = reader.read_ascii_bits(code_len, "code")?;
        if code.is_empty() {
            return Err(ArtifactError::EmptyCode(symbol).into());
        }
        if table.insert(symbol, code).is_some() {
            return Err(ArtifactError::DuplicateSymbol(symbol).into());
        }
    }

    let encoded_len = reader.read_len("encoded_len")?;
    let encoded = reader.read_ascii_bits(encoded_len, "encoded stream")?;

    reader.finish()?;
    Ok(Artifact { table, encoded })
}

/// Parse either artifact format, choosing by the leading magic.
pub fn parse_any_artifact(bytes: &[u8]) -> Result<Artifact> {
    if packed::has_packed_magic(bytes) {
        packed::parse_packed(bytes)
    } else {
        parse_artifact(bytes)
    }
}

/// Bounds-checked forward reader over a byte slice.
pub(crate) struct SliceReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> SliceReader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    pub(crate) fn take(&mut self, len: usize, field: &'static str) -> Result<&'a [u8]> {
        let end = self
            .offset
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or(ArtifactError::Truncated { field })?;
        let slice = &self.bytes[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    pub(crate) fn read_array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, field)?);
        Ok(out)
    }

    pub(crate) fn read_u8(&mut self, field: &'static str) -> Result<u8> {
        Ok(self.take(1, field)?[0])
    }

    /// Read a u64 length and convert it to `usize`.
    pub(crate) fn read_len(&mut self, field: &'static str) -> Result<usize> {
        let value = u64::from_le_bytes(self.read_array(field)?);
        usize::try_from(value).map_err(|_| ArtifactError::OutOfRange { field, value }.into())
    }

    fn read_ascii_bits(&mut self, len: usize, field: &'static str) -> Result<BitString> {
        let start = self.offset;
        let raw = self.take(len, field)?;
        BitString::from_ascii(raw).map_err(|err| match err {
            ArtifactError::InvalidBitChar { byte, offset } => ArtifactError::InvalidBitChar {
                byte,
                offset: start + offset,
            }
            .into(),
            other => Error::from(other),
        })
    }

    /// Fail if unread bytes remain.
    pub(crate) fn finish(self) -> Result<()> {
        let remaining = self.bytes.len() - self.offset;
        if remaining > 0 {
            return Err(ArtifactError::TrailingBytes(remaining).into());
        }
        Ok(())
    }
}
