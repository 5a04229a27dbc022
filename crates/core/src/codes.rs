//! Code assignment.
//!
//! Codes are the root-to-leaf paths of the Huffman tree: `0` for a left
//! edge and `1` for a right edge. A tree that is a single leaf has no edges,
//! so its only symbol gets [`SINGLE_SYMBOL_CODE`] instead of an empty code.

use crate::bitstring::BitString;
use crate::tree::{HuffmanTree, TreeNode};
use std::collections::btree_map::{self, BTreeMap};

/// Code given to the only symbol of a one-symbol alphabet.
pub const SINGLE_SYMBOL_CODE: bool = false;

/// Symbol → code mapping, iterated in ascending symbol order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, BitString>,
}

impl CodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the code table of a tree.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut table = Self::new();
        match tree.root() {
            TreeNode::Leaf { symbol, .. } => {
                table.insert(*symbol, std::iter::once(SINGLE_SYMBOL_CODE).collect());
            }
            root => assign(root, BitString::new(), &mut table),
        }
        log::debug!(
            "assigned {} codes, longest {} bits",
            table.len(),
            table.max_code_len()
        );
        table
    }

    /// Insert or replace the code of `symbol`, returning the previous one.
    pub fn insert(&mut self, symbol: u8, code: BitString) -> Option<BitString> {
        self.codes.insert(symbol, code)
    }

    pub fn get(&self, symbol: u8) -> Option<&BitString> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, u8, BitString> {
        self.codes.iter()
    }

    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(BitString::len).max().unwrap_or(0)
    }

    /// Find a pair of symbols where the first one's code is a prefix of the
    /// second one's, if any.
    pub fn find_prefix_conflict(&self) -> Option<(u8, u8)> {
        // In lexicographic order a prefix sorts immediately before some code
        // that extends it, so checking neighbours is enough.
        let mut sorted: Vec<(&BitString, u8)> =
            self.codes.iter().map(|(&symbol, code)| (code, symbol)).collect();
        sorted.sort();
        sorted
            .windows(2)
            .find(|pair| pair[1].0.starts_with(pair[0].0))
            .map(|pair| (pair[0].1, pair[1].1))
    }

    /// True if no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        self.find_prefix_conflict().is_none()
    }
}

impl<'a> IntoIterator for &'a CodeTable {
    type Item = (&'a u8, &'a BitString);
    type IntoIter = btree_map::Iter<'a, u8, BitString>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn assign(node: &TreeNode, prefix: BitString, table: &mut CodeTable) {
    match node {
        TreeNode::Leaf { symbol, .. } => {
            table.insert(*symbol, prefix);
        }
        TreeNode::Internal { left, right, .. } => {
            assign(left, prefix.with_bit(false), table);
            assign(right, prefix.with_bit(true), table);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;

    fn table_for(data: &[u8]) -> CodeTable {
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(data)).unwrap();
        CodeTable::from_tree(&tree)
    }

    fn code(s: &str) -> BitString {
        s.parse().unwrap()
    }

    #[test]
    fn test_single_symbol_fallback() {
        let table = table_for(b"xxxxx");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(b'x').unwrap().to_string(), "0");
    }

    #[test]
    fn test_two_symbols_one_bit_each() {
        let table = table_for(b"aaab");
        let a = table.get(b'a').unwrap();
        let b = table.get(b'b').unwrap();
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
        assert_ne!(a, b);
    }

    #[test]
    fn test_equal_frequencies_balanced() {
        let table = table_for(b"abcd");
        assert_eq!(table.len(), 4);
        for (_, code) in &table {
            assert_eq!(code.len(), 2);
        }
        assert!(table.is_prefix_free());
    }

    #[test]
    fn test_frequent_symbol_gets_shorter_code() {
        let table = table_for(b"eeeeeeeeeeeeeeeetaoin");
        let e = table.get(b'e').unwrap().len();
        for symbol in *b"taoin" {
            assert!(table.get(symbol).unwrap().len() >= e);
        }
    }

    #[test]
    fn test_prefix_conflict_detected() {
        let mut table = CodeTable::new();
        table.insert(b'a', code("01"));
        table.insert(b'b', code("1"));
        table.insert(b'c', code("011"));
        assert_eq!(table.find_prefix_conflict(), Some((b'a', b'c')));
        assert!(!table.is_prefix_free());
    }

    #[test]
    fn test_empty_table_is_prefix_free() {
        assert!(CodeTable::new().is_prefix_free());
    }
}
