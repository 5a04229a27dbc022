//! End-to-end encode and decode.
//!
//! [`encode_bytes`] is the pure core: bytes in, code table and encoded
//! stream out. [`encode_file`] and [`decode_file`] wrap it with the file
//! boundary and the reporter.

use crate::artifact::{parse_any_artifact, save_artifact, Format};
use crate::bitstring::BitString;
use crate::codes::CodeTable;
use crate::decoder::decode;
use crate::encoder::encode;
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::report::Reporter;
use crate::stats::EncodeStats;
use crate::tree::HuffmanTree;
use std::fs;
use std::path::Path;

/// Everything one encode produces.
#[derive(Debug, Clone)]
pub struct Encoding {
    pub frequencies: FrequencyTable,
    pub tree: HuffmanTree,
    pub table: CodeTable,
    pub encoded: BitString,
}

impl Encoding {
    /// Sum over symbols of frequency × code length.
    ///
    /// Always equal to `encoded.len()`.
    pub fn weighted_length(&self) -> u64 {
        self.frequencies
            .iter()
            .map(|(symbol, count)| count * self.table.get(symbol).map_or(0, |c| c.len() as u64))
            .sum()
    }
}

/// Build the code for `data` and encode it.
///
/// Returns `Ok(None)` for empty input: there is no alphabet, so no tree.
pub fn encode_bytes(data: &[u8]) -> Result<Option<Encoding>> {
    let frequencies = FrequencyTable::from_bytes(data);
    if frequencies.is_empty() {
        return Ok(None);
    }

    let tree = HuffmanTree::from_frequencies(&frequencies)?;
    let table = CodeTable::from_tree(&tree);
    let encoded = encode(data, &table)?;

    Ok(Some(Encoding {
        frequencies,
        tree,
        table,
        encoded,
    }))
}

/// Read every byte of `path`. An empty file is not an error.
///
/// # Errors
/// `Error::SourceUnavailable` if the file cannot be read.
pub fn read_source(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| Error::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })
}

/// Encode the file at `input` and save the artifact to `output`.
///
/// Returns `Ok(None)` when the input is empty; in that case no artifact is
/// created.
pub fn encode_file(
    input: &Path,
    output: &Path,
    format: Format,
    reporter: &mut dyn Reporter,
) -> Result<Option<EncodeStats>> {
    let mut stats = EncodeStats::new(format);
    let data = read_source(input)?;

    let Some(encoding) = encode_bytes(&data)? else {
        log::warn!("{} is empty; skipping encode", input.display());
        reporter.empty_input(input)?;
        return Ok(None);
    };

    reporter.tree(&encoding.tree)?;
    reporter.code_table(&encoding.table)?;
    reporter.encoded(&encoding.encoded)?;

    let written = save_artifact(output, format, &encoding.table, &encoding.encoded)?;
    reporter.saved(output)?;

    stats.input_bytes = data.len() as u64;
    stats.distinct_symbols = encoding.table.len();
    stats.max_code_len = encoding.table.max_code_len();
    stats.encoded_bits = encoding.encoded.len() as u64;
    stats.artifact_bytes = written as u64;
    stats.complete();
    reporter.summary(&stats)?;

    Ok(Some(stats))
}

/// Decode the artifact at `input` (either format) and write the original
/// bytes to `output`. Returns the number of bytes written.
pub fn decode_file(input: &Path, output: &Path) -> Result<usize> {
    let bytes = read_source(input)?;
    let artifact = parse_any_artifact(&bytes)?;
    let decoded = decode(&artifact.table, &artifact.encoded)?;

    fs::write(output, &decoded).map_err(|source| Error::SinkUnavailable {
        path: output.to_path_buf(),
        source,
    })?;

    log::info!(
        "decoded {} bits from {} into {} bytes",
        artifact.encoded.len(),
        input.display(),
        decoded.len()
    );
    Ok(decoded.len())
}
