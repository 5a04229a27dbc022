//! Logical bit sequences.
//!
//! `BitString` is the representation shared by codes and by the encoded
//! stream. It is a plain sequence of bits with no packing; the two artifact
//! formats decide how the bits hit the disk.

use crate::error::ArtifactError;
use std::fmt;
use std::str::FromStr;

/// An ordered sequence of bits, rendered as ASCII '0'/'1'.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitString {
    bits: Vec<bool>,
}

impl BitString {
    pub fn new() -> Self {
        Self { bits: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: Vec::with_capacity(capacity),
        }
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Append every bit of `other`.
    pub fn extend_from(&mut self, other: &BitString) {
        self.bits.extend_from_slice(&other.bits);
    }

    /// Return a copy with `bit` appended.
    pub fn with_bit(&self, bit: bool) -> Self {
        let mut next = self.clone();
        next.push(bit);
        next
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// True if `prefix` is a (not necessarily proper) prefix of `self`.
    pub fn starts_with(&self, prefix: &BitString) -> bool {
        self.bits.starts_with(&prefix.bits)
    }

    /// Render as one ASCII '0' or '1' byte per bit.
    pub fn to_ascii(&self) -> Vec<u8> {
        self.bits.iter().map(|&b| if b { b'1' } else { b'0' }).collect()
    }

    /// Parse one ASCII '0' or '1' byte per bit.
    ///
    /// # Errors
    /// `ArtifactError::InvalidBitChar` with the offset inside `bytes`.
    pub fn from_ascii(bytes: &[u8]) -> Result<Self, ArtifactError> {
        let mut bits = Vec::with_capacity(bytes.len());
        for (offset, &byte) in bytes.iter().enumerate() {
            match byte {
                b'0' => bits.push(false),
                b'1' => bits.push(true),
                _ => return Err(ArtifactError::InvalidBitChar { byte, offset }),
            }
        }
        Ok(Self { bits })
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for BitString {
    type Err = ArtifactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_ascii(s.as_bytes())
    }
}

impl FromIterator<bool> for BitString {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}
