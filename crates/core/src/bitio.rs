//! Bit packing for the packed artifact format.
//!
//! Both directions operate MSB-first: the first bit of a [`BitString`] lands
//! in the most significant bit of the first byte.
//!
//! # Padding Rules
//! - BitWriter: pads the final partial byte with trailing zeros
//! - BitReader: cannot tell padding from data; the caller passes exact lengths
//!
//! # Example
//! ```
//! use huffcode_core::bitio::{BitReader, BitWriter};
//! use huffcode_core::BitString;
//!
//! let code: BitString = "10111".parse().unwrap();
//! let mut writer = BitWriter::new();
//! writer.write_bitstring(&code);
//! let bytes = writer.finish();
//! assert_eq!(bytes, vec![0b1011_1000]);
//!
//! let mut reader = BitReader::new(&bytes);
//! assert_eq!(reader.read_bitstring(5).unwrap(), code);
//! ```

use crate::bitstring::BitString;
use crate::error::{BitIoError, Result};

/// Writes bits MSB-first into a byte buffer.
///
/// # Invariants
/// - `bit_count` is always < 8 between calls
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Current partial byte, MSB-aligned
    bit_buffer: u8,
    /// Bits held in bit_buffer (0-7)
    bit_count: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_bit(&mut self, bit: bool) {
        if bit {
            self.bit_buffer |= 0x80 >> self.bit_count;
        }
        self.bit_count += 1;
        if self.bit_count == 8 {
            self.bytes.push(self.bit_buffer);
            self.bit_buffer = 0;
            self.bit_count = 0;
        }
    }

    pub fn write_bitstring(&mut self, bits: &BitString) {
        for bit in bits.iter() {
            self.write_bit(bit);
        }
    }

    /// Pad to a byte boundary with zeros. No-op when already aligned.
    pub fn align(&mut self) {
        if self.bit_count > 0 {
            self.bytes.push(self.bit_buffer);
            self.bit_buffer = 0;
            self.bit_count = 0;
        }
    }

    /// Pad the final byte and return the output.
    pub fn finish(mut self) -> Vec<u8> {
        self.align();
        self.bytes
    }
}

/// Reads bits MSB-first from a byte buffer.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Next bit to read (0 = MSB of first byte)
    bit_position: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            bit_position: 0,
        }
    }

    /// Read one bit.
    ///
    /// # Errors
    /// `BitIoError::UnexpectedEof` once every bit has been consumed.
    pub fn read_bit(&mut self) -> Result<bool> {
        let byte = self
            .data
            .get(self.bit_position / 8)
            .ok_or(BitIoError::UnexpectedEof)?;
        let bit = byte & (0x80 >> (self.bit_position % 8)) != 0;
        self.bit_position += 1;
        Ok(bit)
    }

    /// Read exactly `len` bits.
    pub fn read_bitstring(&mut self, len: usize) -> Result<BitString> {
        if len > self.bits_remaining() {
            return Err(BitIoError::UnexpectedEof.into());
        }
        let mut bits = BitString::with_capacity(len);
        for _ in 0..len {
            bits.push(self.read_bit()?);
        }
        Ok(bits)
    }

    pub fn bits_remaining(&self) -> usize {
        (self.data.len() * 8).saturating_sub(self.bit_position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> BitString {
        s.parse().unwrap()
    }

    #[test]
    fn test_write_read_single_byte() {
        let mut writer = BitWriter::new();
        writer.write_bitstring(&bits("10110011"));
        let bytes = writer.finish();
        assert_eq!(bytes, vec![0b10110011]);

        let mut reader = BitReader::new(&bytes);
        assert_eq!(reader.read_bitstring(8).unwrap(), bits("10110011"));
    }

    #[test]
    fn test_padding() {
        let mut writer = BitWriter::new();
        writer.write_bit(true);
        assert_eq!(writer.finish(), vec![0b10000000]);
    }

    #[test]
    fn test_align_between_fields() {
        let mut writer = BitWriter::new();
        writer.write_bitstring(&bits("101"));
        writer.align();
        writer.write_bitstring(&bits("11"));
        let bytes = writer.finish();
        assert_eq!(bytes, vec![0b10100000, 0b11000000]);

        let mut reader = BitReader::new(&bytes);
        assert_eq!(reader.read_bitstring(8).unwrap(), bits("10100000"));
        assert_eq!(reader.read_bitstring(2).unwrap(), bits("11"));
        assert_eq!(reader.bits_remaining(), 6);
    }

    #[test]
    fn test_align_when_aligned_is_noop() {
        let mut writer = BitWriter::new();
        writer.align();
        writer.write_bitstring(&bits("00000001"));
        writer.align();
        assert_eq!(writer.finish(), vec![0x01]);
    }

    #[test]
    fn test_read_past_end() {
        let data = [0b10101010];
        let mut reader = BitReader::new(&data);
        assert!(reader.read_bitstring(8).is_ok());
        assert!(reader.read_bit().is_err());
        assert_eq!(reader.bits_remaining(), 0);
    }

    #[test]
    fn test_read_too_many_bits() {
        let mut reader = BitReader::new(&[0xFF]);
        let result = reader.read_bitstring(9);
        assert!(matches!(
            result,
            Err(crate::error::Error::BitIo(BitIoError::UnexpectedEof))
        ));
        // Nothing consumed on failure
        assert_eq!(reader.bits_remaining(), 8);
    }
}
