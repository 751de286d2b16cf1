//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.dramabench.toml` files.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::registry::{self, DimensionSpec, ModelEntry};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = ".dramabench.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Report metadata settings.
    #[serde(default)]
    pub report: ReportConfig,

    /// Evaluation dimensions, in dashboard order. Replacing this list
    /// replaces the built-in dimension set entirely.
    #[serde(default = "crate::registry::default_dimensions")]
    pub dimensions: Vec<DimensionSpec>,

    /// Model display catalog. Replacing this list replaces the built-in
    /// catalog entirely.
    #[serde(default = "crate::registry::model_catalog")]
    pub models: Vec<ModelEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            report: ReportConfig::default(),
            dimensions: registry::default_dimensions(),
            models: registry::model_catalog(),
        }
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Directory containing the per-dimension metric tables.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Directory the JSON documents are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            output_dir: default_output_dir(),
            verbose: false,
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data/keep_clean")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("web/data")
}

/// Report metadata settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Pin the report's `last_updated` stamp. Defaults to the current
    /// UTC date when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<NaiveDate>,

    /// Override the derived distinct-script count. The published
    /// dataset pins this to the full corpus.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_scripts: Option<usize>,

    /// Override the derived evaluation-pair count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_evaluations: Option<usize>,

    /// Average script length in lines, surfaced in the statistics
    /// document.
    #[serde(default = "default_avg_script_length")]
    pub avg_script_length: usize,

    /// Evaluation window, surfaced in the statistics document.
    #[serde(default = "default_evaluation_period")]
    pub evaluation_period: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            last_updated: None,
            total_scripts: None,
            total_evaluations: None,
            avg_script_length: default_avg_script_length(),
            evaluation_period: default_evaluation_period(),
        }
    }
}

fn default_avg_script_length() -> usize {
    250
}

fn default_evaluation_period() -> String {
    "2025-12-16 to 2025-12-20".to_string()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref data_dir) = args.data_dir {
            self.general.data_dir = data_dir.clone();
        }
        if let Some(ref out) = args.out {
            self.general.output_dir = out.clone();
        }
        if let Some(date) = args.date {
            self.report.last_updated = Some(date);
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::EvalKind;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.data_dir, PathBuf::from("data/keep_clean"));
        assert_eq!(config.general.output_dir, PathBuf::from("web/data"));
        assert_eq!(config.dimensions.len(), 6);
        assert_eq!(config.models.len(), 8);
        assert_eq!(config.report.avg_script_length, 250);
        assert_eq!(config.report.last_updated, None);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
data_dir = "out/metrics"
verbose = true

[report]
last_updated = "2025-12-20"
total_scripts = 1103
total_evaluations = 8824

[[dimensions]]
id = "pacing"
metric = "beats_per_page"
kind = "llm-labeled"

[[dimensions]]
id = "format_standards"
metric = "format_error_rate"
file = "fmt.csv"
kind = "rule-based"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.data_dir, PathBuf::from("out/metrics"));
        assert!(config.general.verbose);
        assert_eq!(
            config.report.last_updated,
            NaiveDate::from_ymd_opt(2025, 12, 20)
        );
        assert_eq!(config.report.total_scripts, Some(1103));

        // Configured dimensions replace the built-in set
        assert_eq!(config.dimensions.len(), 2);
        assert_eq!(config.dimensions[0].id, "pacing");
        assert_eq!(config.dimensions[0].kind, EvalKind::LlmLabeled);
        assert_eq!(config.dimensions[1].file_name(), "fmt.csv");

        // Model catalog falls back to the built-in one
        assert_eq!(config.models.len(), 8);
    }

    #[test]
    fn test_merge_with_args() {
        let mut config = Config::default();
        let args = crate::cli::Args {
            data_dir: Some(PathBuf::from("other/data")),
            out: None,
            config: None,
            date: NaiveDate::from_ymd_opt(2026, 1, 15),
            strict: false,
            skip_statistics: false,
            verbose: true,
            quiet: false,
            init_config: false,
        };

        config.merge_with_args(&args);

        assert_eq!(config.general.data_dir, PathBuf::from("other/data"));
        assert_eq!(config.general.output_dir, PathBuf::from("web/data"));
        assert_eq!(
            config.report.last_updated,
            NaiveDate::from_ymd_opt(2026, 1, 15)
        );
        assert!(config.general.verbose);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[report]"));
        assert!(toml_str.contains("[[dimensions]]"));
        assert!(toml_str.contains("[[models]]"));

        // The generated template parses back to the defaults
        let config: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.dimensions.len(), 6);
        assert_eq!(config.models.len(), 8);
    }
}
