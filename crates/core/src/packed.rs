//! Packed artifact: a versioned, bit-packed and checksummed alternative to
//! the ASCII layout in [`crate::artifact`].
//!
//! # Layout
//!
//! ```text
//! +------------------+
//! | Magic (4 bytes)  |  0x48 0x46 0x50 0x4B ("HFPK")
//! +------------------+
//! | version (1)      |  currently 1
//! +------------------+
//! | entry_count (2)  |  u16 little-endian, 0..=256
//! +------------------+
//! | bit_len (8)      |  u64 number of bits in the encoded stream
//! +------------------+
//! | crc32 (4)        |  u32 checksum of everything but magic and crc
//! +------------------+
//! | entries          |  per entry: symbol (1), code_len (1),
//! | (variable)       |  code bits MSB-first padded to a byte
//! +------------------+
//! | payload          |  encoded bits MSB-first, ceil(bit_len / 8) bytes
//! +------------------+
//! ```
//!
//! # CRC Coverage
//!
//! The CRC32 covers version, entry_count, bit_len, the entries and the
//! payload.

use crate::artifact::{Artifact, SliceReader};
use crate::bitio::{BitReader, BitWriter};
use crate::bitstring::BitString;
use crate::codes::CodeTable;
use crate::error::{ArtifactError, Error, Result};

/// Magic number for packed artifacts: "HFPK"
const MAGIC: [u8; 4] = [0x48, 0x46, 0x50, 0x4B];

/// Packed layout version written by this build
pub const VERSION: u8 = 1;

/// Size of the packed header in bytes
const HEADER_SIZE: usize = 19;

/// True if `bytes` starts with the packed magic.
pub fn has_packed_magic(bytes: &[u8]) -> bool {
    bytes.starts_with(&MAGIC)
}

/// Serialize a code table and encoded stream into the packed layout.
///
/// # Errors
/// `ArtifactError::OutOfRange` if a code is longer than 255 bits or the
/// table has more than 256 entries.
pub fn serialize_packed(table: &CodeTable, encoded: &BitString) -> Result<Vec<u8>> {
    let entry_count = u16::try_from(table.len())
        .ok()
        .filter(|&n| n <= 256)
        .ok_or(ArtifactError::OutOfRange {
            field: "entry_count",
            value: table.len() as u64,
        })?;

    let mut body = Vec::new();
    for (&symbol, code) in table {
        let code_len = u8::try_from(code.len()).map_err(|_| ArtifactError::OutOfRange {
            field: "code_len",
            value: code.len() as u64,
        })?;
        body.push(symbol);
        body.push(code_len);
        let mut writer = BitWriter::new();
        writer.write_bitstring(code);
        body.extend_from_slice(&writer.finish());
    }

    let mut writer = BitWriter::new();
    writer.write_bitstring(encoded);
    body.extend_from_slice(&writer.finish());

    let bit_len = encoded.len() as u64;
    let crc32 = compute_crc(entry_count, bit_len, &body);

    let mut bytes = Vec::with_capacity(HEADER_SIZE + body.len());
    bytes.extend_from_slice(&MAGIC);
    bytes.push(VERSION);
    bytes.extend_from_slice(&entry_count.to_le_bytes());
    bytes.extend_from_slice(&bit_len.to_le_bytes());
    bytes.extend_from_slice(&crc32.to_le_bytes());
    bytes.extend_from_slice(&body);

    Ok(bytes)
}

/// Parse a packed artifact.
///
/// # Errors
/// - `ArtifactError::Truncated` if the buffer is shorter than its fields
/// - `ArtifactError::InvalidMagic` / `UnsupportedVersion` for a foreign header
/// - `Error::Crc` if the checksum does not match
/// - `ArtifactError::DuplicateSymbol` / `EmptyCode` for a malformed table
/// - `ArtifactError::TrailingBytes` if anything follows the payload
pub fn parse_packed(bytes: &[u8]) -> Result<Artifact> {
    let mut header = SliceReader::new(bytes);

    let magic: [u8; 4] = header.read_array("magic")?;
    if magic != MAGIC {
        return Err(ArtifactError::InvalidMagic {
            expected: MAGIC,
            actual: magic,
        }
        .into());
    }

    let version = header.read_u8("version")?;
    if version != VERSION {
        return Err(ArtifactError::UnsupportedVersion(version).into());
    }

    let entry_count = u16::from_le_bytes(header.read_array("entry_count")?);
    let bit_len = u64::from_le_bytes(header.read_array("bit_len")?);
    let crc32 = u32::from_le_bytes(header.read_array("crc32")?);
    debug_assert_eq!(header.offset(), HEADER_SIZE);

    let body = &bytes[HEADER_SIZE..];
    let computed = compute_crc(entry_count, bit_len, body);
    if computed != crc32 {
        return Err(Error::Crc {
            expected: crc32,
            actual: computed,
        });
    }

    if entry_count > 256 {
        return Err(ArtifactError::OutOfRange {
            field: "entry_count",
            value: entry_count as u64,
        }
        .into());
    }

    let mut reader = SliceReader::new(body);
    let mut table = CodeTable::new();
    for _ in 0..entry_count {
        let symbol = reader.read_u8("symbol")?;
        let code_len = reader.read_u8("code_len")? as usize;
        if code_len == 0 {
            return Err(ArtifactError::EmptyCode(symbol).into());
        }
        let packed = reader.take(code_len.div_ceil(8), "code")?;
        let code = BitReader::new(packed).read_bitstring(code_len)?;
        if table.insert(symbol, code).is_some() {
            return Err(ArtifactError::DuplicateSymbol(symbol).into());
        }
    }

    let payload_len = usize::try_from(bit_len.div_ceil(8)).map_err(|_| ArtifactError::OutOfRange {
        field: "bit_len",
        value: bit_len,
    })?;
    let payload = reader.take(payload_len, "payload")?;
    // bit_len fits in usize because payload_len does and payload was in memory
    let encoded = BitReader::new(payload).read_bitstring(bit_len as usize)?;

    reader.finish()?;
    Ok(Artifact { table, encoded })
}

/// CRC32 over the protected fields.
fn compute_crc(entry_count: u16, bit_len: u64, body: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&[VERSION]);
    hasher.update(&entry_count.to_le_bytes());
    hasher.update(&bit_len.to_le_bytes());
    hasher.update(body);
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::encode_bytes;

    fn packed_for(data: &[u8]) -> (Vec<u8>, CodeTable, BitString) {
        let encoding = encode_bytes(data).unwrap().unwrap();
        let bytes = serialize_packed(&encoding.table, &encoding.encoded).unwrap();
        (bytes, encoding.table, encoding.encoded)
    }

    #[test]
    fn test_round_trip() {
        let (bytes, table, encoded) = packed_for(b"hello world! this is a test.");
        let artifact = parse_packed(&bytes).unwrap();
        assert_eq!(artifact.table, table);
        assert_eq!(artifact.encoded, encoded);
    }

    #[test]
    fn test_header_fields() {
        let (bytes, table, encoded) = packed_for(b"aaab");
        assert!(has_packed_magic(&bytes));
        assert_eq!(bytes[4], VERSION);
        assert_eq!(u16::from_le_bytes([bytes[5], bytes[6]]) as usize, table.len());
        let bit_len = u64::from_le_bytes(bytes[7..15].try_into().unwrap());
        assert_eq!(bit_len as usize, encoded.len());
    }

    #[test]
    fn test_smaller_than_ascii() {
        let data = b"The quick brown fox jumps over the lazy dog. ".repeat(50);
        let (bytes, table, encoded) = packed_for(&data);
        let ascii = crate::artifact::serialize_artifact(&table, &encoded);
        assert!(bytes.len() < ascii.len());
        assert!(bytes.len() < data.len());
    }

    #[test]
    fn test_invalid_magic() {
        let mut bytes = vec![0xFF, 0xFF, 0xFF, 0xFF];
        bytes.extend_from_slice(&[0u8; HEADER_SIZE - 4]);
        let result = parse_packed(&bytes);
        assert!(matches!(
            result,
            Err(Error::Artifact(ArtifactError::InvalidMagic { .. }))
        ));
    }

    #[test]
    fn test_unsupported_version() {
        let (mut bytes, _, _) = packed_for(b"abc");
        bytes[4] = 9;
        let result = parse_packed(&bytes);
        assert!(matches!(
            result,
            Err(Error::Artifact(ArtifactError::UnsupportedVersion(9)))
        ));
    }

    #[test]
    fn test_header_too_short() {
        let result = parse_packed(&MAGIC);
        assert!(matches!(
            result,
            Err(Error::Artifact(ArtifactError::Truncated { field: "version" }))
        ));
    }

    #[test]
    fn test_crc_mismatch() {
        let (mut bytes, _, _) = packed_for(b"test data");
        let len = bytes.len();
        bytes[len - 1] ^= 0x01;
        let result = parse_packed(&bytes);
        assert!(matches!(result, Err(Error::Crc { .. })));
    }

    #[test]
    fn test_single_symbol() {
        let data = vec![b'X'; 65536];
        let (bytes, _, _) = packed_for(&data);
        // One bit per byte of input
        assert!(bytes.len() < data.len() / 7);
        let artifact = parse_packed(&bytes).unwrap();
        let decoded = crate::decoder::decode(&artifact.table, &artifact.encoded).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_code_too_long() {
        let mut table = CodeTable::new();
        table.insert(b'a', std::iter::repeat(true).take(256).collect());
        let result = serialize_packed(&table, &BitString::new());
        assert!(matches!(
            result,
            Err(Error::Artifact(ArtifactError::OutOfRange { field: "code_len", .. }))
        ));
    }
}
