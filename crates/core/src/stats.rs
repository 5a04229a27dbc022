//! Statistics for an encode run.
//!
//! Collected by [`crate::pipeline::encode_file`] and handed to the reporter.
//! Ratios are relative to the input size; an ASCII artifact is expected to be
//! larger than its input.

use crate::artifact::Format;
use std::time::{Duration, Instant};

/// Counts and timing for one encode.
#[derive(Debug, Clone)]
pub struct EncodeStats {
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    /// Artifact format that was written
    pub format: Format,

    /// Bytes read from the input
    pub input_bytes: u64,

    /// Distinct symbols in the input
    pub distinct_symbols: usize,

    /// Longest code in the table
    pub max_code_len: usize,

    /// Bits in the encoded stream
    pub encoded_bits: u64,

    /// Bytes written to the artifact
    pub artifact_bytes: u64,
}

impl EncodeStats {
    /// Start a new run now.
    pub fn new(format: Format) -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            format,
            input_bytes: 0,
            distinct_symbols: 0,
            max_code_len: 0,
            encoded_bits: 0,
            artifact_bytes: 0,
        }
    }

    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Mean code length in bits per input byte.
    ///
    /// Returns 0.0 for empty input.
    pub fn average_code_length(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.encoded_bits as f64 / self.input_bytes as f64
        }
    }

    /// Artifact size divided by input size.
    pub fn expansion_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.artifact_bytes as f64 / self.input_bytes as f64
        }
    }

    /// Multi-line human summary.
    pub fn render_summary(&self) -> String {
        format!(
            "\n=== Encode Summary ===\n\
             Duration: {} ms\n\
             Input: {} bytes, {} distinct symbols\n\
             Encoded: {} bits ({:.3} bits/symbol, longest code {})\n\
             Artifact: {} bytes, {} format ({:.1}% of input)\n",
            self.duration().as_millis(),
            self.input_bytes,
            self.distinct_symbols,
            self.encoded_bits,
            self.average_code_length(),
            self.max_code_len,
            self.artifact_bytes,
            self.format.name(),
            self.expansion_ratio() * 100.0,
        )
    }

    /// Export as `key=value` lines (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             format={}\n\
             input_bytes={}\n\
             distinct_symbols={}\n\
             max_code_len={}\n\
             encoded_bits={}\n\
             artifact_bytes={}\n\
             average_code_length={:.4}\n\
             expansion_ratio={:.4}\n",
            self.duration().as_millis(),
            self.format.name(),
            self.input_bytes,
            self.distinct_symbols,
            self.max_code_len,
            self.encoded_bits,
            self.artifact_bytes,
            self.average_code_length(),
            self.expansion_ratio(),
        )
    }
}
