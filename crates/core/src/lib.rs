//! huffcode-core: Huffman coding of byte text into a self-describing artifact
//!
//! This library builds a prefix-free code for the byte alphabet of an input,
//! encodes the input with it, and serializes the code table plus the encoded
//! stream.
//!
//! # Architecture
//!
//! Data flows strictly left to right:
//! bytes → frequencies → tree → code table → encoded stream → artifact.
//!
//! - `frequency`: byte counting
//! - `tree`: Huffman tree construction
//! - `codes`: code assignment from tree paths
//! - `encoder` / `decoder`: stream encoding and its inverse
//! - `artifact`: the ASCII artifact layout (default)
//! - `packed` + `bitio`: the bit-packed, versioned artifact layout
//! - `pipeline`: pure encode plus file-level encode/decode
//! - `report` / `stats`: human-readable output and run statistics
//!
//! # Example
//!
//! ```
//! use huffcode_core::{decode, encode_bytes};
//!
//! let encoding = encode_bytes(b"aaab").unwrap().expect("non-empty input");
//! assert_eq!(encoding.table.len(), 2);
//! assert_eq!(encoding.encoded.len(), 4);
//! assert_eq!(decode(&encoding.table, &encoding.encoded).unwrap(), b"aaab");
//! ```

pub mod artifact;
pub mod bitio;
pub mod bitstring;
pub mod codes;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod packed;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod tree;

// Re-export commonly used types
pub use artifact::{parse_any_artifact, parse_artifact, save_artifact, serialize_artifact, Artifact, Format};
pub use bitstring::BitString;
pub use codes::CodeTable;
pub use decoder::decode;
pub use encoder::encode;
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use pipeline::{decode_file, encode_bytes, encode_file, read_source, Encoding};
pub use report::{NullReporter, Reporter, TextReporter};
pub use stats::EncodeStats;
pub use tree::{HuffmanTree, TreeNode};

/// Printable label for a symbol: the character itself for printable ASCII
/// (space included), hex otherwise.
pub fn symbol_label(symbol: u8) -> String {
    if symbol.is_ascii_graphic() || symbol == b' ' {
        (symbol as char).to_string()
    } else {
        format!("{symbol:#04x}")
    }
}
