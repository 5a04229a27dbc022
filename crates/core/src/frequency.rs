//! Byte frequency counting.

/// Occurrence count for every byte value.
///
/// Only symbols that occur at least once are part of the alphabet; iteration
/// yields them in ascending symbol order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl FrequencyTable {
    /// Create a table with every count at zero.
    pub fn new() -> Self {
        Self { counts: [0; 256] }
    }

    /// Count every byte of `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        for &byte in data {
            table.counts[byte as usize] += 1;
        }
        table
    }

    /// Count of `symbol` (zero if absent).
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Number of distinct symbols present.
    pub fn len(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Sum of all counts, equal to the length of the counted input.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// `(symbol, count)` pairs with a positive count, ascending by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }

    /// Add the counts of `other` into this table.
    ///
    /// Used to combine per-chunk tables before a tree is built.
    pub fn merge(&mut self, other: &FrequencyTable) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine += theirs;
        }
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let table = FrequencyTable::from_bytes(b"aaab");
        assert_eq!(table.get(b'a'), 3);
        assert_eq!(table.get(b'b'), 1);
        assert_eq!(table.get(b'c'), 0);
        assert_eq!(table.len(), 2);
        assert_eq!(table.total(), 4);
    }

    #[test]
    fn test_empty() {
        let table = FrequencyTable::from_bytes(b"");
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert_eq!(table.iter().count(), 0);
    }

    #[test]
    fn test_iter_ascending() {
        let table = FrequencyTable::from_bytes(&[0xFF, b'z', 0x00, b'a', b'z']);
        let pairs: Vec<_> = table.iter().collect();
        assert_eq!(pairs, vec![(0x00, 1), (b'a', 1), (b'z', 2), (0xFF, 1)]);
    }

    #[test]
    fn test_merge_matches_whole_count() {
        let data = b"the quick brown fox jumps over the lazy dog";
        let mut merged = FrequencyTable::new();
        for chunk in data.chunks(7) {
            merged.merge(&FrequencyTable::from_bytes(chunk));
        }
        assert_eq!(merged, FrequencyTable::from_bytes(data));
    }
}
