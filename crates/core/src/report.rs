//! Human-readable reporting.
//!
//! The pipeline never prints. It hands what it produced to a [`Reporter`],
//! which decides whether and where to render it. [`TextReporter`] renders the
//! classic console listing; [`NullReporter`] drops everything.

use crate::bitstring::BitString;
use crate::codes::CodeTable;
use crate::stats::EncodeStats;
use crate::symbol_label;
use crate::tree::HuffmanTree;
use std::io::{self, Write};
use std::path::Path;

/// Receives the products of an encode run. Every hook defaults to a no-op.
pub trait Reporter {
    fn tree(&mut self, _tree: &HuffmanTree) -> io::Result<()> {
        Ok(())
    }

    fn code_table(&mut self, _table: &CodeTable) -> io::Result<()> {
        Ok(())
    }

    fn encoded(&mut self, _encoded: &BitString) -> io::Result<()> {
        Ok(())
    }

    fn saved(&mut self, _path: &Path) -> io::Result<()> {
        Ok(())
    }

    /// The input had no bytes, so nothing was encoded or written.
    fn empty_input(&mut self, _path: &Path) -> io::Result<()> {
        Ok(())
    }

    fn summary(&mut self, _stats: &EncodeStats) -> io::Result<()> {
        Ok(())
    }
}

/// Discards every report.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {}

/// Renders reports as text into any writer.
///
/// ```text
///
/// Huffman Codes:
/// a: 1
/// b: 0
///
/// Encoded Text: 1110
/// Encoded data saved to encoded.bin
/// ```
#[derive(Debug)]
pub struct TextReporter<W: Write> {
    out: W,
    show_tree: bool,
    show_encoded: bool,
    show_summary: bool,
}

impl TextReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TextReporter<W> {
    /// Codes and the encoded text are shown; tree and summary are not.
    pub fn new(out: W) -> Self {
        Self {
            out,
            show_tree: false,
            show_encoded: true,
            show_summary: false,
        }
    }

    pub fn with_tree(mut self, show: bool) -> Self {
        self.show_tree = show;
        self
    }

    pub fn with_encoded(mut self, show: bool) -> Self {
        self.show_encoded = show;
        self
    }

    pub fn with_summary(mut self, show: bool) -> Self {
        self.show_summary = show;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn tree(&mut self, tree: &HuffmanTree) -> io::Result<()> {
        if self.show_tree {
            writeln!(self.out, "\nHuffman Tree:")?;
            self.out.write_all(tree.render().as_bytes())?;
        }
        Ok(())
    }

    fn code_table(&mut self, table: &CodeTable) -> io::Result<()> {
        writeln!(self.out, "\nHuffman Codes:")?;
        for (&symbol, code) in table {
            writeln!(self.out, "{}: {}", symbol_label(symbol), code)?;
        }
        Ok(())
    }

    fn encoded(&mut self, encoded: &BitString) -> io::Result<()> {
        if self.show_encoded {
            writeln!(self.out, "\nEncoded Text: {encoded}")?;
        }
        Ok(())
    }

    fn saved(&mut self, path: &Path) -> io::Result<()> {
        writeln!(self.out, "Encoded data saved to {}", path.display())
    }

    fn empty_input(&mut self, path: &Path) -> io::Result<()> {
        writeln!(self.out, "{} is empty; nothing to encode", path.display())
    }

    fn summary(&mut self, stats: &EncodeStats) -> io::Result<()> {
        if self.show_summary {
            self.out.write_all(stats.render_summary().as_bytes())?;
        }
        Ok(())
    }
}
