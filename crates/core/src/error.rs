//! Error types for the huffcode pipeline.
//!
//! All operations return structured errors rather than panicking.
//! Every error is terminal for the operation that raised it: nothing retries,
//! and a partially written artifact is never considered valid.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all operations in the system.
///
/// Each variant corresponds to a specific failure domain:
/// - Source/sink: the input cannot be read or the artifact cannot be created
/// - Encoding: a byte has no entry in the code table
/// - Huffman: tree construction misuse
/// - Artifact: a serialized artifact is malformed
/// - Decode: an encoded stream does not match its code table
/// - Bit I/O: reading/writing packed bits
#[derive(Debug, Error)]
pub enum Error {
    /// The input source could not be read
    #[error("cannot read input {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output destination could not be opened for writing
    #[error("cannot open output {} for writing: {source}", path.display())]
    SinkUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A byte in the input has no code. Only reachable when the code table
    /// was built from a different input.
    #[error("byte {symbol:#04x} at position {position} has no code in the table")]
    UnknownSymbol { symbol: u8, position: usize },

    /// Huffman tree construction error
    #[error("huffman error: {0}")]
    Huffman(#[from] HuffmanError),

    /// Malformed artifact
    #[error("artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    /// Encoded stream does not decode against its table
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Bit I/O operation failed (e.g., reading past end of buffer)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// CRC validation of a packed artifact failed
    #[error("CRC mismatch: expected {expected:#010x}, got {actual:#010x}")]
    Crc { expected: u32, actual: u32 },

    /// I/O error after the sink was opened, or while reporting
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Huffman construction errors.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// No symbols with non-zero frequency (cannot build a tree)
    #[error("empty frequency table: cannot build a tree")]
    EmptyFrequencyTable,
}

/// Errors raised while parsing a serialized artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// The buffer ended before a field could be read
    #[error("artifact truncated while reading {field}")]
    Truncated { field: &'static str },

    /// A code or stream byte was not an ASCII '0' or '1'
    #[error("invalid bit character {byte:#04x} at offset {offset}")]
    InvalidBitChar { byte: u8, offset: usize },

    /// A size field does not fit the platform or the format
    #[error("{field} value {value} is out of range")]
    OutOfRange { field: &'static str, value: u64 },

    /// The same symbol appears twice in the code table
    #[error("duplicate code table entry for symbol {0:#04x}")]
    DuplicateSymbol(u8),

    /// A code table entry has a zero-length code
    #[error("empty code for symbol {0:#04x}")]
    EmptyCode(u8),

    /// Bytes remain after the encoded stream
    #[error("{0} trailing bytes after the encoded stream")]
    TrailingBytes(usize),

    /// Packed artifact does not start with the expected magic
    #[error("invalid magic number: expected {expected:?}, got {actual:?}")]
    InvalidMagic { expected: [u8; 4], actual: [u8; 4] },

    /// Packed artifact has a version this build does not understand
    #[error("unsupported packed artifact version {0}")]
    UnsupportedVersion(u8),
}

/// Errors raised while decoding an encoded stream against a code table.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Some code in the table is a prefix of another
    #[error("code for {shorter:#04x} is a prefix of the code for {longer:#04x}")]
    NotPrefixFree { shorter: u8, longer: u8 },

    /// A code in the table has no bits
    #[error("empty code for symbol {0:#04x}")]
    EmptyCode(u8),

    /// The stream follows a path no code takes
    #[error("no code matches the bits ending at position {position}")]
    InvalidCode { position: usize },

    /// The stream ended in the middle of a code
    #[error("stream ends inside a code that started at position {position}")]
    TruncatedCode { position: usize },
}

/// Bit-level I/O errors.
#[derive(Debug, Error)]
pub enum BitIoError {
    /// Attempted to read past the end of the buffer
    #[error("unexpected end of bit stream")]
    UnexpectedEof,
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
