//! DramaBench data pipeline
//!
//! A CLI tool that aggregates the per-dimension evaluation metrics of
//! the DramaBench benchmark into the JSON documents served by the
//! static web dashboard.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (config, I/O, internal consistency)
//!   2 - Dimensions were skipped and --strict was set

mod analysis;
mod cli;
mod config;
mod error;
mod models;
mod registry;
mod report;
mod table;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::Args;
use config::Config;
use error::PipelineError;
use models::ScoreRecord;
use registry::DimensionSpec;
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("dramabench-data v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the pipeline
    match run_pipeline(args) {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Aggregation failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .dramabench.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(config::DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            config::DEFAULT_CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", config::DEFAULT_CONFIG_FILE))?;

    println!(
        "✅ Created {} with default settings.",
        config::DEFAULT_CONFIG_FILE
    );
    println!("   Edit it to customize data paths, dimensions, and the model catalog.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete aggregation workflow. Returns exit code (0 or 2).
fn run_pipeline(args: Args) -> Result<i32> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let data_dir = config.general.data_dir.clone();
    if !data_dir.is_dir() {
        anyhow::bail!("Data directory does not exist: {}", data_dir.display());
    }

    let last_updated = config
        .report
        .last_updated
        .unwrap_or_else(|| Utc::now().date_naive());

    // Step 1: Load and score each dimension
    println!("📥 Reading metric tables from: {}", data_dir.display());

    let mut all_records: Vec<ScoreRecord> = Vec::new();
    let mut tracker = analysis::CoverageTracker::default();
    let mut skipped: Vec<String> = Vec::new();

    for spec in &config.dimensions {
        match process_dimension(&data_dir, spec, &mut tracker) {
            Ok(records) => {
                let rows: usize = records.iter().map(|r| r.sample_count).sum();
                info!(
                    "dimension '{}': {} models scored over {} rows",
                    spec.id,
                    records.len(),
                    rows
                );
                all_records.extend(records);
            }
            Err(e) if e.is_recoverable() => {
                warn!("Skipping dimension: {}", e);
                skipped.push(spec.id.clone());
            }
            Err(e) => return Err(e.into()),
        }
    }

    if !skipped.is_empty() {
        println!(
            "⚠️  Skipped {} dimension(s): {}",
            skipped.len(),
            skipped.join(", ")
        );
    }

    // Step 2: Merge into the overall ranking
    println!("\n📝 Building leaderboard...");

    let dimension_order: Vec<String> = config.dimensions.iter().map(|d| d.id.clone()).collect();
    let rankings = analysis::merge_rankings(&all_records, &dimension_order);
    let counts = tracker
        .counts(&all_records, &rankings)
        .with_overrides(config.report.total_scripts, config.report.total_evaluations);

    // Step 3: Assemble and write the documents
    let meta = analysis::ReportMeta {
        last_updated,
        counts,
        dimensions: &config.dimensions,
        models: &config.models,
    };
    let leaderboard =
        analysis::build_report(&all_records, &rankings, &meta).context("Report assembly failed")?;

    let out_dir = &config.general.output_dir;
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    let leaderboard_path = out_dir.join(report::LEADERBOARD_FILE);
    report::write_leaderboard(&leaderboard, &leaderboard_path)?;
    println!(
        "✓ Leaderboard saved: {} models ({})",
        leaderboard.overall_rankings.len(),
        leaderboard_path.display()
    );

    if !args.skip_statistics {
        let statistics = report::build_statistics(&config, &counts);
        let statistics_path = out_dir.join(report::STATISTICS_FILE);
        report::write_statistics(&statistics, &statistics_path)?;
        println!("✓ Statistics saved ({})", statistics_path.display());
    }

    // Print summary
    println!("\n📊 Aggregation Summary:");
    println!(
        "   Dimensions processed: {}/{}",
        config.dimensions.len() - skipped.len(),
        config.dimensions.len()
    );
    println!("   Models ranked: {}", counts.models_evaluated);
    println!(
        "   Scripts: {} | Evaluations: {}",
        counts.total_scripts, counts.total_evaluations
    );

    if !leaderboard.overall_rankings.is_empty() {
        println!();
        print!("{}", report::generate_ranking_table(&leaderboard));
    }

    println!(
        "\n✅ Aggregation complete! Output written to: {}",
        out_dir.display()
    );

    // Check --strict threshold
    if args.strict && !skipped.is_empty() {
        eprintln!(
            "\n⛔ {} dimension(s) missing input with --strict set. Failing (exit code 2).",
            skipped.len()
        );
        return Ok(2);
    }

    Ok(0)
}

/// Load and score one dimension's table, folding it into the coverage
/// counts on success.
fn process_dimension(
    data_dir: &Path,
    spec: &DimensionSpec,
    tracker: &mut analysis::CoverageTracker,
) -> Result<Vec<ScoreRecord>, PipelineError> {
    let table = analysis::load_dimension_table(data_dir, spec)?;
    let records = analysis::compute_dimension_scores(&table, spec)?;
    tracker.observe(&table);
    Ok(records)
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", config::DEFAULT_CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
