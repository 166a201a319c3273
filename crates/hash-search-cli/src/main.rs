mod commands;
mod progress;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hash_search_core::SearchConfig;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hash-search")]
#[command(about = "Brute-force search for button sequences matching a two-word hash")]
#[command(version)]
struct Args {
    /// TOML file with window_size, threads and progress settings
    #[arg(short, long, global = true, env = "HASH_SEARCH_CONFIG")]
    config: Option<PathBuf>,

    /// Backend worker threads (0 = one per core)
    #[arg(short, long, global = true)]
    threads: Option<usize>,

    /// Largest number of candidates per dispatch
    #[arg(short, long, global = true)]
    window_size: Option<u64>,

    /// Do not draw progress
    #[arg(long, global = true)]
    no_progress: bool,

    /// Log search events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search every sequence of exactly MAX_LENGTH symbols
    Fixed {
        /// Sequence length (only this exact length is searched)
        max_length: u8,
        /// First hash word (hex)
        target_hash_1: String,
        /// Second hash word (hex)
        target_hash_2: String,
    },
    /// Search blocks of MIN_LENGTH..=MAX_LENGTH symbols repeated
    /// MIN_REPETITIONS..=MAX_REPETITIONS times
    Range {
        min_length: u8,
        max_length: u8,
        min_repetitions: u8,
        max_repetitions: u8,
        /// First hash word (hex)
        target_hash_1: String,
        /// Second hash word (hex)
        target_hash_2: String,
    },
    /// Print the two hash words of a sequence such as SXCTLDRU
    Hash { sequence: String },
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version are not failures
            let code = if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            e.print().ok();
            return code;
        }
    };

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            let invalid_args = e
                .downcast_ref::<hash_search_core::Error>()
                .is_some_and(|e| e.is_argument_error());
            if invalid_args {
                eprintln!("Invalid arguments: {:#}", e);
            } else {
                eprintln!("Error: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<bool> {
    init_logging(args.verbose)?;
    let config = resolve_config(&args)?;
    debug!("Search config: {:?}", config);

    match args.command {
        Command::Fixed {
            max_length,
            target_hash_1,
            target_hash_2,
        } => commands::fixed::run(max_length, &target_hash_1, &target_hash_2, &config),
        Command::Range {
            min_length,
            max_length,
            min_repetitions,
            max_repetitions,
            target_hash_1,
            target_hash_2,
        } => commands::range::run(
            min_length,
            max_length,
            min_repetitions,
            max_repetitions,
            &target_hash_1,
            &target_hash_2,
            &config,
        ),
        Command::Hash { sequence } => {
            commands::hash::run(&sequence)?;
            Ok(true)
        }
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("hash_search_core={}", level).parse()?)
                .add_directive(format!("hash_search={}", level).parse()?),
        )
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// Config file values, overridden by command-line flags
fn resolve_config(args: &Args) -> Result<SearchConfig> {
    let base = match &args.config {
        Some(path) => match SearchConfig::load(path) {
            Ok(c) => {
                debug!("Loaded config from {:?}", path);
                c
            }
            Err(e) => {
                warn!("Failed to load config {:?}: {}, using defaults", path, e);
                SearchConfig::default()
            }
        },
        None => SearchConfig::default(),
    };

    let mut builder = SearchConfig::builder().base(base);
    if let Some(threads) = args.threads {
        builder = builder.threads(threads);
    }
    if let Some(size) = args.window_size {
        builder = builder.window_size(size);
    }
    if args.no_progress {
        builder = builder.progress(false);
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_parse_fixed() {
        let args = Args::try_parse_from(["hash-search", "fixed", "9", "0x1ECA8E89", "AD2DC1D6"])
            .unwrap();
        match args.command {
            Command::Fixed {
                max_length,
                target_hash_1,
                target_hash_2,
            } => {
                assert_eq!(max_length, 9);
                assert_eq!(target_hash_1, "0x1ECA8E89");
                assert_eq!(target_hash_2, "AD2DC1D6");
            }
            _ => panic!("expected fixed command"),
        }
    }

    #[test]
    fn test_parse_range_with_global_flags() {
        let args = Args::try_parse_from([
            "hash-search",
            "range",
            "1",
            "9",
            "1",
            "3",
            "1ECA8E89",
            "AD2DC1D6",
            "--threads",
            "4",
            "--no-progress",
        ])
        .unwrap();
        assert_eq!(args.threads, Some(4));
        assert!(args.no_progress);
        assert!(matches!(
            args.command,
            Command::Range {
                min_length: 1,
                max_length: 9,
                min_repetitions: 1,
                max_repetitions: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_rejects_wrong_argument_count() {
        let err = Args::try_parse_from(["hash-search", "fixed", "9", "1ECA8E89"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert!(err.use_stderr());
    }

    #[test]
    fn test_parse_rejects_non_numeric_length() {
        let err = Args::try_parse_from(["hash-search", "fixed", "nine", "0", "0"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_resolve_config_flags_override_defaults() {
        let args = Args::try_parse_from([
            "hash-search",
            "--window-size",
            "512",
            "--no-progress",
            "hash",
            "SX",
        ])
        .unwrap();
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.window_size, 512);
        assert!(!config.progress);
        assert_eq!(config.threads, 0);
    }

    #[test]
    fn test_resolve_config_missing_file_falls_back() {
        let args = Args::try_parse_from([
            "hash-search",
            "--config",
            "/nonexistent/hash-search.toml",
            "hash",
            "SX",
        ])
        .unwrap();
        let config = resolve_config(&args).unwrap();
        assert_eq!(config, SearchConfig::default());
    }

    #[test]
    fn test_resolve_config_rejects_zero_window() {
        let args =
            Args::try_parse_from(["hash-search", "--window-size", "0", "hash", "SX"]).unwrap();
        assert!(resolve_config(&args).is_err());
    }
}
