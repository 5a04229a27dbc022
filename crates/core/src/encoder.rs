//! Mapping input bytes through a code table.

use crate::bitstring::BitString;
use crate::codes::CodeTable;
use crate::error::{Error, Result};

/// Concatenate the code of every byte of `data`, in input order.
///
/// # Errors
/// `Error::UnknownSymbol` if a byte has no code. This cannot happen when the
/// table was derived from the same data.
pub fn encode(data: &[u8], table: &CodeTable) -> Result<BitString> {
    let mut encoded = BitString::with_capacity(data.len());
    for (position, &symbol) in data.iter().enumerate() {
        let code = table
            .get(symbol)
            .ok_or(Error::UnknownSymbol { symbol, position })?;
        encoded.extend_from(code);
    }
    Ok(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(u8, &str)]) -> CodeTable {
        let mut table = CodeTable::new();
        for &(symbol, code) in entries {
            table.insert(symbol, code.parse().unwrap());
        }
        table
    }

    #[test]
    fn test_concatenates_in_order() {
        let table = table(&[(b'a', "0"), (b'b', "10"), (b'c', "11")]);
        let encoded = encode(b"abcab", &table).unwrap();
        assert_eq!(encoded.to_string(), "01011010");
    }

    #[test]
    fn test_unknown_symbol() {
        let table = table(&[(b'a', "0"), (b'b', "1")]);
        let result = encode(b"abz", &table);
        assert!(matches!(
            result,
            Err(Error::UnknownSymbol {
                symbol: b'z',
                position: 2
            })
        ));
    }

    #[test]
    fn test_empty_input() {
        let encoded = encode(b"", &CodeTable::new()).unwrap();
        assert!(encoded.is_empty());
    }
}
