//! Decoding an encoded stream against its code table.
//!
//! The table is turned into a binary trie (an arena of nodes addressed by
//! index); the stream then walks the trie one bit at a time and emits a
//! symbol whenever it reaches a leaf.

use crate::bitstring::BitString;
use crate::codes::CodeTable;
use crate::error::{DecodeError, Result};

const ROOT: usize = 0;

#[derive(Debug, Clone, Copy)]
enum TrieNode {
    Branch { children: [Option<usize>; 2] },
    Leaf { symbol: u8 },
}

/// Decoding trie built from a prefix-free code table.
#[derive(Debug, Clone)]
pub struct DecodeTrie {
    nodes: Vec<TrieNode>,
}

impl DecodeTrie {
    /// Build the trie for `table`.
    ///
    /// # Errors
    /// - `DecodeError::EmptyCode` if a code has no bits
    /// - `DecodeError::NotPrefixFree` if one code is a prefix of another
    pub fn new(table: &CodeTable) -> Result<Self> {
        if let Some((&symbol, _)) = table.iter().find(|(_, code)| code.is_empty()) {
            return Err(DecodeError::EmptyCode(symbol).into());
        }
        if let Some((shorter, longer)) = table.find_prefix_conflict() {
            return Err(DecodeError::NotPrefixFree { shorter, longer }.into());
        }

        let mut nodes = vec![TrieNode::Branch {
            children: [None, None],
        }];

        for (&symbol, code) in table {
            let mut current = ROOT;
            let last = code.len() - 1;
            for (depth, bit) in code.iter().enumerate() {
                let slot = bit as usize;
                let existing = match nodes[current] {
                    TrieNode::Branch { children } => children[slot],
                    TrieNode::Leaf { symbol: shorter } => {
                        return Err(DecodeError::NotPrefixFree {
                            shorter,
                            longer: symbol,
                        }
                        .into());
                    }
                };
                current = match existing {
                    Some(child) => child,
                    None => {
                        let child = nodes.len();
                        nodes.push(if depth == last {
                            TrieNode::Leaf { symbol }
                        } else {
                            TrieNode::Branch {
                                children: [None, None],
                            }
                        });
                        if let TrieNode::Branch { children } = &mut nodes[current] {
                            children[slot] = Some(child);
                        }
                        child
                    }
                };
            }
        }

        Ok(Self { nodes })
    }

    /// Decode `stream` into the original bytes.
    ///
    /// # Errors
    /// - `DecodeError::InvalidCode` if the bits follow a path no code takes
    /// - `DecodeError::TruncatedCode` if the stream stops inside a code
    pub fn decode(&self, stream: &BitString) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        let mut current = ROOT;
        let mut code_start = 0;

        for (position, bit) in stream.iter().enumerate() {
            let next = match self.nodes[current] {
                TrieNode::Branch { children } => children[bit as usize],
                TrieNode::Leaf { .. } => None,
            };
            let Some(next) = next else {
                return Err(DecodeError::InvalidCode { position }.into());
            };
            match self.nodes[next] {
                TrieNode::Leaf { symbol } => {
                    output.push(symbol);
                    current = ROOT;
                    code_start = position + 1;
                }
                TrieNode::Branch { .. } => current = next,
            }
        }

        if current != ROOT {
            return Err(DecodeError::TruncatedCode {
                position: code_start,
            }
            .into());
        }

        Ok(output)
    }
}

/// Decode `stream` against `table`.
pub fn decode(table: &CodeTable, stream: &BitString) -> Result<Vec<u8>> {
    DecodeTrie::new(table)?.decode(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn table(entries: &[(u8, &str)]) -> CodeTable {
        let mut table = CodeTable::new();
        for &(symbol, code) in entries {
            table.insert(symbol, code.parse().unwrap());
        }
        table
    }

    fn bits(s: &str) -> BitString {
        s.parse().unwrap()
    }

    #[test]
    fn test_decode_basic() {
        let table = table(&[(b'a', "0"), (b'b', "10"), (b'c', "11")]);
        let decoded = decode(&table, &bits("01011010")).unwrap();
        assert_eq!(decoded, b"abcab");
    }

    #[test]
    fn test_single_symbol_table() {
        let table = table(&[(b'q', "0")]);
        assert_eq!(decode(&table, &bits("000")).unwrap(), b"qqq");
    }

    #[test]
    fn test_invalid_code() {
        let table = table(&[(b'q', "0")]);
        let result = decode(&table, &bits("001"));
        assert!(matches!(
            result,
            Err(Error::Decode(DecodeError::InvalidCode { position: 2 }))
        ));
    }

    #[test]
    fn test_truncated_code() {
        let table = table(&[(b'a', "0"), (b'b', "10"), (b'c', "11")]);
        let result = decode(&table, &bits("0101"));
        assert!(matches!(
            result,
            Err(Error::Decode(DecodeError::TruncatedCode { position: 3 }))
        ));
    }

    #[test]
    fn test_rejects_non_prefix_free() {
        let table = table(&[(b'a', "1"), (b'b', "10")]);
        let result = DecodeTrie::new(&table);
        assert!(matches!(
            result,
            Err(Error::Decode(DecodeError::NotPrefixFree {
                shorter: b'a',
                longer: b'b'
            }))
        ));
    }

    #[test]
    fn test_rejects_empty_code() {
        let table = table(&[(b'a', ""), (b'b', "1")]);
        let result = DecodeTrie::new(&table);
        assert!(matches!(
            result,
            Err(Error::Decode(DecodeError::EmptyCode(b'a')))
        ));
    }

    #[test]
    fn test_empty_stream() {
        let table = table(&[(b'a', "0"), (b'b', "1")]);
        assert!(decode(&table, &BitString::new()).unwrap().is_empty());
    }
}
