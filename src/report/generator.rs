//! JSON document generation.
//!
//! This module renders and writes the documents the static dashboard
//! serves, plus a plain-text ranking table for console output.

use crate::models::LeaderboardReport;
use crate::report::statistics::StatisticsDoc;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// File name of the leaderboard document.
pub const LEADERBOARD_FILE: &str = "leaderboard.json";
/// File name of the statistics document.
pub const STATISTICS_FILE: &str = "statistics.json";

/// Render the leaderboard document as pretty-printed JSON.
pub fn generate_leaderboard_json(report: &LeaderboardReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Render the statistics document as pretty-printed JSON.
pub fn generate_statistics_json(doc: &StatisticsDoc) -> Result<String> {
    serde_json::to_string_pretty(doc).map_err(Into::into)
}

/// Write the leaderboard document to a file.
pub fn write_leaderboard(report: &LeaderboardReport, path: &Path) -> Result<()> {
    let content = generate_leaderboard_json(report)?;
    write_document(&content, path)
}

/// Write the statistics document to a file.
pub fn write_statistics(doc: &StatisticsDoc, path: &Path) -> Result<()> {
    let content = generate_statistics_json(doc)?;
    write_document(&content, path)
}

fn write_document(content: &str, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}

/// Generate a plain-text ranking table for console output.
pub fn generate_ranking_table(report: &LeaderboardReport) -> String {
    let mut table = String::new();

    table.push_str(&format!(
        "   {:<5} {:<24} {:>9}\n",
        "Rank", "Model", "Avg Score"
    ));

    for entry in &report.overall_rankings {
        table.push_str(&format!(
            "   {:<5} {:<24} {:>9.4}\n",
            entry.rank, entry.model, entry.avg_score
        ));
    }

    table
}
