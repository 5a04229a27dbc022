//! huffcode CLI
//!
//! Usage:
//!   huffcode [--in <text>] [--out <artifact>] [--format ascii|packed]
//!   huffcode --decode [--in <artifact>] [--out <text>]

mod config;
mod input_gen;

use config::{Command, Config, Mode};
use huffcode_core::{decode_file, encode_file, Error, TextReporter};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match Config::from_args(&args) {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            config::print_help();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run with --help for usage.");
            return ExitCode::from(2);
        }
    };

    init_logging(config.verbose);
    log::debug!("resolved configuration: {:?}", config);

    if config.print_config {
        config.print();
    }

    let (code, message) = outcome(run(&config));
    if let Some(message) = message {
        eprintln!("{}", message);
    }
    ExitCode::from(code)
}

/// Exit status and stderr line for a finished run.
fn outcome(result: huffcode_core::Result<()>) -> (u8, Option<String>) {
    match result {
        Ok(()) => (0, None),
        Err(Error::SourceUnavailable { path, source }) => (
            1,
            Some(format!("File did not open: {} ({})", path.display(), source)),
        ),
        Err(e) => (1, Some(format!("Error: {}", e))),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn run(config: &Config) -> huffcode_core::Result<()> {
    if let Some(generate) = config.generate {
        input_gen::write_sample_file(&config.input_file, generate.seed, generate.size_bytes)
            .map_err(|source| Error::SinkUnavailable {
                path: config.input_file.clone(),
                source,
            })?;
        println!(
            "Generated {} bytes into {} (seed {})",
            generate.size_bytes,
            config.input_file.display(),
            generate.seed
        );
    }

    match config.mode {
        Mode::Encode => {
            let mut reporter = TextReporter::stdout()
                .with_tree(config.print_tree)
                .with_encoded(config.print_encoded)
                .with_summary(config.print_stats);
            encode_file(
                &config.input_file,
                &config.output_file,
                config.format,
                &mut reporter,
            )?;
        }
        Mode::Decode => {
            let written = decode_file(&config.input_file, &config.output_file)?;
            println!(
                "Decoded {} bytes to {}",
                written,
                config.output_file.display()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(args: &[&str]) -> Config {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        match Config::from_args(&args).unwrap() {
            Command::Run(config) => config,
            Command::Help => panic!("unexpected help"),
        }
    }

    #[test]
    fn test_missing_input_reports_and_fails() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("absent.txt");
        let output = dir.path().join("encoded.bin");
        let config = config(&[
            "--in",
            input.to_str().unwrap(),
            "--out",
            output.to_str().unwrap(),
            "--quiet",
        ]);

        let (code, message) = outcome(run(&config));
        assert_eq!(code, 1);
        let message = message.unwrap();
        assert!(message.starts_with(&format!("File did not open: {}", input.display())));
        assert!(!output.exists());
    }

    #[test]
    fn test_other_errors_prefixed() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("garbage.bin");
        std::fs::write(&input, b"not an artifact").unwrap();
        let output = dir.path().join("decoded.txt");
        let config = config(&[
            "--decode",
            "--in",
            input.to_str().unwrap(),
            "--out",
            output.to_str().unwrap(),
        ]);

        let (code, message) = outcome(run(&config));
        assert_eq!(code, 1);
        assert!(message.unwrap().starts_with("Error: "));
    }

    #[test]
    fn test_success_is_silent() {
        assert_eq!(outcome(Ok(())), (0, None));
    }
}
