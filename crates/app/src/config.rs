//! Configuration for the huffcode application.
//!
//! Handles parsing command-line arguments. The tool works with ZERO
//! arguments: it encodes `sample.txt` into `encoded.bin`.

use huffcode_core::Format;
use std::path::PathBuf;

/// Default input path when `--in` is not given.
pub const DEFAULT_INPUT: &str = "sample.txt";

/// Default artifact path when encoding.
pub const DEFAULT_ENCODE_OUTPUT: &str = "encoded.bin";

/// Default output path when decoding.
pub const DEFAULT_DECODE_OUTPUT: &str = "decoded.txt";

/// What the run does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Encode,
    Decode,
}

/// Sample generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generate {
    pub size_bytes: usize,
    pub seed: u64,
}

/// Complete configuration for a run.
#[derive(Debug, Clone)]
pub struct Config {
    // === Files ===
    /// Input file path (text when encoding, artifact when decoding)
    pub input_file: PathBuf,

    /// Output file path
    pub output_file: PathBuf,

    // === Behavior ===
    pub mode: Mode,

    /// Artifact format written when encoding
    pub format: Format,

    /// Write a generated sample to the input path first
    pub generate: Option<Generate>,

    // === Reporting ===
    /// Whether to print the tree structure
    pub print_tree: bool,

    /// Whether to print the encoded text
    pub print_encoded: bool,

    /// Whether to print the encode summary
    pub print_stats: bool,

    /// Whether to print the resolved configuration
    pub print_config: bool,

    /// Debug-level logging
    pub verbose: bool,
}

/// Outcome of argument parsing.
#[derive(Debug, Clone)]
pub enum Command {
    Run(Config),
    Help,
}

impl Config {
    /// Parse configuration from command-line arguments (without the program
    /// name).
    ///
    /// If `--generate` is given without `--seed`, a time-based seed is used.
    pub fn from_args(args: &[String]) -> Result<Command, String> {
        let mut input_file: Option<PathBuf> = None;
        let mut output_file: Option<PathBuf> = None;
        let mut mode = Mode::Encode;
        let mut format = Format::Ascii;
        let mut generate_bytes: Option<usize> = None;
        let mut seed: Option<u64> = None;
        let mut print_tree = false;
        let mut print_encoded = true;
        let mut print_stats = false;
        let mut print_config = false;
        let mut verbose = false;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--in" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--in requires a path".to_string());
                    }
                    input_file = Some(PathBuf::from(&args[i]));
                }
                "--out" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--out requires a path".to_string());
                    }
                    output_file = Some(PathBuf::from(&args[i]));
                }
                "--format" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--format requires ascii or packed".to_string());
                    }
                    format = Format::from_name(&args[i])
                        .ok_or_else(|| format!("invalid format: {}", args[i]))?;
                }
                "--decode" => {
                    mode = Mode::Decode;
                }
                "--generate" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--generate requires a number of bytes".to_string());
                    }
                    generate_bytes = Some(args[i].parse().map_err(|_| "invalid generate size")?);
                }
                "--seed" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--seed requires a number".to_string());
                    }
                    seed = Some(args[i].parse().map_err(|_| "invalid seed")?);
                }
                "--print-tree" => {
                    print_tree = true;
                }
                "--quiet" => {
                    print_encoded = false;
                }
                "--stats" => {
                    print_stats = true;
                }
                "--print-config" => {
                    print_config = true;
                }
                "--verbose" | "-v" => {
                    verbose = true;
                }
                "--help" | "-h" => {
                    return Ok(Command::Help);
                }
                _ => {
                    return Err(format!("unknown argument: {}", args[i]));
                }
            }
            i += 1;
        }

        if mode == Mode::Decode && generate_bytes.is_some() {
            return Err("--generate cannot be combined with --decode".to_string());
        }
        if seed.is_some() && generate_bytes.is_none() {
            return Err("--seed only applies to --generate".to_string());
        }

        let generate = generate_bytes.map(|size_bytes| Generate {
            size_bytes,
            seed: seed.unwrap_or_else(time_seed),
        });

        let default_output = match mode {
            Mode::Encode => DEFAULT_ENCODE_OUTPUT,
            Mode::Decode => DEFAULT_DECODE_OUTPUT,
        };

        Ok(Command::Run(Config {
            input_file: input_file.unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT)),
            output_file: output_file.unwrap_or_else(|| PathBuf::from(default_output)),
            mode,
            format,
            generate,
            print_tree,
            print_encoded,
            print_stats,
            print_config,
            verbose,
        }))
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Mode:        {:?}", self.mode);
        println!("Input file:  {}", self.input_file.display());
        println!("Output file: {}", self.output_file.display());
        if self.mode == Mode::Encode {
            println!("Format:      {}", self.format.name());
        }
        if let Some(generate) = &self.generate {
            println!();
            println!("=== Sample Generation ===");
            println!("Size: {} bytes", generate.size_bytes);
            println!("Seed: {}", generate.seed);
        }
        println!();
    }
}

fn time_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

pub fn print_help() {
    println!("huffcode: Huffman-encode a text file into a code table and bit stream");
    println!();
    println!("USAGE:");
    println!("    huffcode [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --in <PATH>         Input file (default: {DEFAULT_INPUT})");
    println!("    --out <PATH>        Output file (default: {DEFAULT_ENCODE_OUTPUT}, or {DEFAULT_DECODE_OUTPUT} with --decode)");
    println!("    --format <FMT>      Artifact format: ascii or packed (default: ascii)");
    println!("    --decode            Decode an artifact (either format) instead of encoding");
    println!();
    println!("    --generate <N>      Write an N-byte sample text to the input path first");
    println!("    --seed <N>          Random seed for --generate");
    println!();
    println!("    --print-tree        Print the Huffman tree");
    println!("    --quiet             Don't print the encoded text");
    println!("    --stats             Print an encode summary");
    println!("    --print-config      Print resolved configuration");
    println!("    --verbose, -v       Debug logging (RUST_LOG also works)");
    println!("    --help, -h          Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    huffcode                                      # sample.txt -> encoded.bin");
    println!("    huffcode --in book.txt --format packed --stats");
    println!("    huffcode --generate 4096 --seed 42 --quiet    # Deterministic sample run");
    println!("    huffcode --decode --in encoded.bin --out restored.txt");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, String> {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        Config::from_args(&args)
    }

    fn config(args: &[&str]) -> Config {
        match parse(args).unwrap() {
            Command::Run(config) => config,
            Command::Help => panic!("unexpected help"),
        }
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert_eq!(config.input_file, PathBuf::from("sample.txt"));
        assert_eq!(config.output_file, PathBuf::from("encoded.bin"));
        assert_eq!(config.mode, Mode::Encode);
        assert_eq!(config.format, Format::Ascii);
        assert!(config.generate.is_none());
        assert!(config.print_encoded);
        assert!(!config.print_tree);
    }

    #[test]
    fn test_paths_and_format() {
        let config = config(&["--in", "a.txt", "--out", "a.huf", "--format", "packed"]);
        assert_eq!(config.input_file, PathBuf::from("a.txt"));
        assert_eq!(config.output_file, PathBuf::from("a.huf"));
        assert_eq!(config.format, Format::Packed);
    }

    #[test]
    fn test_decode_default_output() {
        let config = config(&["--decode", "--in", "encoded.bin"]);
        assert_eq!(config.mode, Mode::Decode);
        assert_eq!(config.output_file, PathBuf::from("decoded.txt"));
    }

    #[test]
    fn test_generate_with_seed() {
        let config = config(&["--generate", "1024", "--seed", "7"]);
        assert_eq!(
            config.generate,
            Some(Generate {
                size_bytes: 1024,
                seed: 7
            })
        );
    }

    #[test]
    fn test_flags() {
        let config = config(&["--quiet", "--print-tree", "--stats", "-v"]);
        assert!(!config.print_encoded);
        assert!(config.print_tree);
        assert!(config.print_stats);
        assert!(config.verbose);
    }

    #[test]
    fn test_help() {
        assert!(matches!(parse(&["-h"]), Ok(Command::Help)));
    }

    #[test]
    fn test_errors() {
        assert!(parse(&["--in"]).is_err());
        assert!(parse(&["--format", "zip"]).is_err());
        assert!(parse(&["--generate", "lots"]).is_err());
        assert!(parse(&["--seed", "3"]).is_err());
        assert!(parse(&["--decode", "--generate", "10"]).is_err());
        assert!(parse(&["--bogus"]).is_err());
    }
}
