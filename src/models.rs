//! Data models for the aggregation pipeline.
//!
//! This module contains the core data structures flowing through the
//! pipeline, from per-dimension score records to the serialized
//! leaderboard document.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One model's score for one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Model identifier as it appears in the metric tables.
    pub model_id: String,
    /// Dimension the score belongs to.
    pub dimension_id: String,
    /// Arithmetic mean of the dimension's key metric over the model's
    /// valid rows.
    pub score: f64,
    /// Total rows the model contributed to the table, valid or not.
    pub sample_count: usize,
}

/// One model's cross-dimension standing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRanking {
    /// Model identifier as it appears in the metric tables.
    pub model_id: String,
    /// Mean of the model's available dimension scores. Dimensions without
    /// a score are excluded from the average, not counted as zero.
    pub avg_score: f64,
    /// Per-dimension scores keyed by dimension id, in configured
    /// dimension order. Skipped dimensions are simply absent.
    pub dimension_scores: IndexMap<String, f64>,
    /// Leaderboard position, 1-based and dense.
    pub rank: usize,
}

/// Counts surfaced in the report metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportCounts {
    /// Distinct scripts seen across the processed tables.
    pub total_scripts: usize,
    /// Distinct (model, script) evaluation pairs.
    pub total_evaluations: usize,
    /// Models present in the final ranking.
    pub models_evaluated: usize,
    /// Dimensions that contributed at least one score record.
    pub dimensions: usize,
}

impl ReportCounts {
    /// Apply configured count overrides. The published dataset pins its
    /// script and evaluation totals to the full corpus even when a run
    /// covers a subset of the tables.
    pub fn with_overrides(
        mut self,
        total_scripts: Option<usize>,
        total_evaluations: Option<usize>,
    ) -> Self {
        if let Some(scripts) = total_scripts {
            self.total_scripts = scripts;
        }
        if let Some(evaluations) = total_evaluations {
            self.total_evaluations = evaluations;
        }
        self
    }
}

/// `overall_rankings` entry as the dashboard consumes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingEntry {
    /// Catalog display name (the raw id when unmapped).
    pub model: String,
    /// Model identifier.
    pub model_id: String,
    /// Mean of the available dimension scores.
    pub avg_score: f64,
    /// Per-dimension scores keyed by dimension id.
    pub dimension_scores: IndexMap<String, f64>,
    /// Leaderboard position.
    pub rank: usize,
}

impl RankingEntry {
    /// Creates a dashboard entry from a ranking and its display name.
    pub fn from_ranking(ranking: &ModelRanking, display_name: &str) -> Self {
        Self {
            model: display_name.to_string(),
            model_id: ranking.model_id.clone(),
            avg_score: ranking.avg_score,
            dimension_scores: ranking.dimension_scores.clone(),
            rank: ranking.rank,
        }
    }
}

/// `dimension_details` entry as the dashboard consumes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionDetail {
    /// Catalog display name (the raw id when unmapped).
    pub model: String,
    /// Model identifier.
    pub model_id: String,
    /// Dimension display name.
    pub dimension: String,
    /// Dimension identifier.
    pub dimension_id: String,
    /// Mean key-metric value.
    pub score: f64,
    /// Rows the model contributed to the dimension's table.
    pub samples: usize,
}

impl DimensionDetail {
    /// Creates a dashboard entry from a score record and display names.
    pub fn from_record(record: &ScoreRecord, model_name: &str, dimension_name: &str) -> Self {
        Self {
            model: model_name.to_string(),
            model_id: record.model_id.clone(),
            dimension: dimension_name.to_string(),
            dimension_id: record.dimension_id.clone(),
            score: record.score,
            samples: record.sample_count,
        }
    }
}

/// The complete leaderboard document. Field order here is the
/// serialization order the dashboard expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardReport {
    /// Date the data was generated or pinned.
    pub last_updated: NaiveDate,
    /// Distinct scripts covered by the evaluation.
    pub total_scripts: usize,
    /// Distinct (model, script) evaluation pairs.
    pub total_evaluations: usize,
    /// Models present in the ranking.
    pub models_evaluated: usize,
    /// Dimensions that contributed scores.
    pub dimensions: usize,
    /// Ranked models, best first.
    pub overall_rankings: Vec<RankingEntry>,
    /// Per-model per-dimension breakdown.
    pub dimension_details: Vec<DimensionDetail>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranking() -> ModelRanking {
        let mut dimension_scores = IndexMap::new();
        dimension_scores.insert("format_standards".to_string(), 0.91);
        dimension_scores.insert("emotional_depth".to_string(), 0.84);
        ModelRanking {
            model_id: "claude-opus-4.5".to_string(),
            avg_score: 0.875,
            dimension_scores,
            rank: 1,
        }
    }

    #[test]
    fn test_ranking_entry_from_ranking() {
        let entry = RankingEntry::from_ranking(&ranking(), "Claude Opus 4.5");
        assert_eq!(entry.model, "Claude Opus 4.5");
        assert_eq!(entry.model_id, "claude-opus-4.5");
        assert_eq!(entry.rank, 1);
        assert_eq!(
            entry.dimension_scores.get("format_standards"),
            Some(&0.91)
        );
    }

    #[test]
    fn test_dimension_detail_from_record() {
        let record = ScoreRecord {
            model_id: "gpt-5.2".to_string(),
            dimension_id: "logic_consistency".to_string(),
            score: 0.05,
            sample_count: 137,
        };
        let detail = DimensionDetail::from_record(&record, "GPT-5.2", "Logic Consistency");
        assert_eq!(detail.model, "GPT-5.2");
        assert_eq!(detail.dimension, "Logic Consistency");
        assert_eq!(detail.dimension_id, "logic_consistency");
        assert_eq!(detail.samples, 137);
    }

    #[test]
    fn test_counts_overrides() {
        let counts = ReportCounts {
            total_scripts: 12,
            total_evaluations: 24,
            models_evaluated: 2,
            dimensions: 2,
        };

        let pinned = counts.with_overrides(Some(1103), Some(8824));
        assert_eq!(pinned.total_scripts, 1103);
        assert_eq!(pinned.total_evaluations, 8824);
        assert_eq!(pinned.models_evaluated, 2);

        let untouched = counts.with_overrides(None, None);
        assert_eq!(untouched, counts);
    }

    #[test]
    fn test_report_serializes_in_dashboard_order() {
        let report = LeaderboardReport {
            last_updated: NaiveDate::from_ymd_opt(2025, 12, 20).unwrap(),
            total_scripts: 1103,
            total_evaluations: 8824,
            models_evaluated: 1,
            dimensions: 2,
            overall_rankings: vec![RankingEntry::from_ranking(&ranking(), "Claude Opus 4.5")],
            dimension_details: Vec::new(),
        };

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"last_updated\":\"2025-12-20\""));

        let order = [
            "last_updated",
            "total_scripts",
            "total_evaluations",
            "models_evaluated",
            "dimensions",
            "overall_rankings",
            "dimension_details",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|key| json.find(&format!("\"{}\"", key)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_dimension_scores_preserve_insertion_order() {
        let entry = RankingEntry::from_ranking(&ranking(), "Claude Opus 4.5");
        let keys: Vec<&String> = entry.dimension_scores.keys().collect();
        assert_eq!(keys, ["format_standards", "emotional_depth"]);
    }
}
