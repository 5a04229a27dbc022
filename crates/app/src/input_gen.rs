//! Sample text generation.
//!
//! `--generate` writes a seeded sample to the input path so the tool can be
//! tried without preparing a file. The text mimics natural language: words
//! drawn from a small vocabulary with a skewed distribution, spaces,
//! punctuation and line breaks, giving a skewed byte histogram with a few
//! rare symbols.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io::Write;
use std::path::Path;

const WORDS: &[&str] = &[
    "the", "of", "and", "a", "to", "in", "is", "you", "that", "it", "he", "was", "for", "on",
    "are", "as", "with", "his", "they", "at", "be", "this", "from", "have", "or", "by", "one",
    "had", "not", "but", "what", "all", "were", "when", "we", "there", "can", "an", "your",
    "which", "their", "said", "if", "do", "will", "each", "about", "how", "up", "out", "them",
    "huffman", "tree", "code", "symbol", "frequency", "prefix", "zephyr", "quixotic", "jukebox",
];

/// Generate `size_bytes` of text-like data from `seed`.
pub fn generate_sample_text(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes + 16);
    let mut sentence_start = true;
    let mut words_in_line = 0;

    while data.len() < size_bytes {
        // Squaring biases toward the front of the vocabulary
        let r: f64 = rng.gen();
        let word = WORDS[((r * r) * WORDS.len() as f64) as usize % WORDS.len()];

        if sentence_start {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                data.push(first.to_ascii_uppercase() as u8);
                data.extend_from_slice(chars.as_str().as_bytes());
            }
            sentence_start = false;
        } else {
            data.extend_from_slice(word.as_bytes());
        }
        words_in_line += 1;

        match rng.gen_range(0..20) {
            0 => {
                data.push(b'.');
                sentence_start = true;
            }
            1 => data.push(b','),
            2 if rng.gen_bool(0.2) => {
                data.push(b'!');
                sentence_start = true;
            }
            _ => {}
        }

        if words_in_line >= 12 && rng.gen_bool(0.3) {
            data.push(b'\n');
            words_in_line = 0;
        } else {
            data.push(b' ');
        }
    }

    data.truncate(size_bytes);
    data
}

/// Write generated text to a file.
pub fn write_sample_file(path: &Path, seed: u64, size_bytes: usize) -> std::io::Result<()> {
    let data = generate_sample_text(seed, size_bytes);
    let mut file = std::fs::File::create(path)?;
    file.write_all(&data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_size() {
        for size in [0, 1, 100, 1000, 10000] {
            assert_eq!(generate_sample_text(999, size).len(), size);
        }
    }

    #[test]
    fn test_determinism() {
        assert_eq!(generate_sample_text(12345, 5000), generate_sample_text(12345, 5000));
    }

    #[test]
    fn test_different_seeds() {
        assert_ne!(generate_sample_text(1, 1000), generate_sample_text(2, 1000));
    }

    #[test]
    fn test_text_like() {
        let data = generate_sample_text(42, 4000);
        assert!(data.iter().all(|b| b.is_ascii()));
        assert!(data.contains(&b' '));
        // Skewed: the space is far more common than 'z'
        let spaces = data.iter().filter(|&&b| b == b' ').count();
        let zs = data.iter().filter(|&&b| b == b'z').count();
        assert!(spaces > zs);
    }

    #[test]
    fn test_write_sample_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.txt");
        write_sample_file(&path, 7, 256).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), generate_sample_text(7, 256));
    }
}
