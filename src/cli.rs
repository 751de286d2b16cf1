//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// DramaBench data pipeline - aggregates evaluation metrics for the dashboard
///
/// Reads the per-dimension metric tables produced by the evaluation jobs,
/// computes per-model scores and the overall leaderboard, and writes the
/// JSON documents the static web dashboard serves.
///
/// Examples:
///   dramabench-data
///   dramabench-data --data-dir data/keep_clean --out web/data
///   dramabench-data --date 2025-12-20 --strict
///   dramabench-data --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Directory containing the per-dimension metric tables
    ///
    /// Each configured dimension reads `{id}_metrics.csv` from this
    /// directory unless its config entry names another file.
    /// Can also be set via DRAMABENCH_DATA_DIR or .dramabench.toml.
    #[arg(short, long, value_name = "DIR", env = "DRAMABENCH_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Output directory for the generated JSON documents
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .dramabench.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Pin the report's last_updated stamp (YYYY-MM-DD)
    ///
    /// Defaults to the current UTC date. Pin it to make output
    /// byte-reproducible across days.
    #[arg(long, value_name = "DATE")]
    pub date: Option<NaiveDate>,

    /// Fail when any configured dimension has to be skipped
    ///
    /// Useful for CI around data releases. Exit code 2 when a metric
    /// table or its key-metric column is missing.
    #[arg(long)]
    pub strict: bool,

    /// Skip writing statistics.json
    #[arg(long)]
    pub skip_statistics: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .dramabench.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        // Validate the data directory if provided
        if let Some(ref data_dir) = self.data_dir {
            if !data_dir.exists() {
                return Err(format!(
                    "Data directory does not exist: {}",
                    data_dir.display()
                ));
            }
            if !data_dir.is_dir() {
                return Err(format!(
                    "Data path is not a directory: {}",
                    data_dir.display()
                ));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            data_dir: None,
            out: None,
            config: None,
            date: None,
            strict: false,
            skip_statistics: false,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_validation_passes_on_defaults() {
        let args = make_args();
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_missing_data_dir() {
        let mut args = make_args();
        args.data_dir = Some(PathBuf::from("/definitely/not/here"));
        let err = args.validate().unwrap_err();
        assert!(err.contains("does not exist"));
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_skipped_for_init_config() {
        let mut args = make_args();
        args.init_config = true;
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_date_parses_from_cli() {
        let args =
            Args::try_parse_from(["dramabench-data", "--date", "2025-12-20", "--strict"]).unwrap();
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2025, 12, 20));
        assert!(args.strict);
    }
}
