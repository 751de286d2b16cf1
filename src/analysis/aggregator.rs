//! Leaderboard aggregation.
//!
//! The pipeline turns independent per-dimension metric tables into one
//! consolidated, ranked report in three pure steps: per-dimension score
//! computation, cross-dimension ranking, and report assembly. Dimensions
//! whose input is missing are skipped by the caller; everything else is
//! deterministic over the input tables, so repeated runs on unchanged
//! data produce byte-identical output.

use std::collections::BTreeSet;
use std::path::Path;

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::error::PipelineError;
use crate::models::{
    DimensionDetail, LeaderboardReport, ModelRanking, RankingEntry, ReportCounts, ScoreRecord,
};
use crate::registry::{self, DimensionSpec, ModelEntry};
use crate::table::{parse_metric, MetricTable, TableError};

/// Column every metric table must carry.
pub const MODEL_COLUMN: &str = "model";
/// Column identifying the evaluated script, used for coverage counts.
pub const SCRIPT_COLUMN: &str = "script_id";

/// Load the metric table configured for a dimension.
///
/// Absent or unreadable files surface as [`PipelineError::MissingInput`]
/// so the caller can skip the dimension and keep going.
pub fn load_dimension_table(
    data_dir: &Path,
    spec: &DimensionSpec,
) -> Result<MetricTable, PipelineError> {
    let path = data_dir.join(spec.file_name());
    MetricTable::load(&path).map_err(|source| PipelineError::MissingInput {
        dimension: spec.id.clone(),
        path,
        source,
    })
}

/// Mean accumulator for one model's group of rows.
#[derive(Debug, Default)]
struct MetricAccumulator {
    rows: usize,
    valid: usize,
    sum: f64,
}

impl MetricAccumulator {
    fn mean(&self) -> Option<f64> {
        (self.valid > 0).then(|| self.sum / self.valid as f64)
    }
}

/// Compute one [`ScoreRecord`] per model present in a dimension's table.
///
/// Rows are grouped by the `model` column in first-appearance order.
/// `sample_count` is the full size of the group while the mean only
/// covers cells that parse as finite numbers. A model whose cells are all
/// invalid emits no record rather than a fabricated zero.
pub fn compute_dimension_scores(
    table: &MetricTable,
    spec: &DimensionSpec,
) -> Result<Vec<ScoreRecord>, PipelineError> {
    let model_idx = table
        .require_column(MODEL_COLUMN)
        .map_err(|source| missing_input(spec, table, source))?;
    let metric_idx = table
        .require_column(&spec.metric)
        .map_err(|source| missing_input(spec, table, source))?;

    let mut groups: IndexMap<String, MetricAccumulator> = IndexMap::new();

    for row in &table.rows {
        let model = cell(row, model_idx);
        if model.is_empty() {
            continue;
        }

        let acc = groups.entry(model.to_string()).or_default();
        acc.rows += 1;
        if let Some(value) = parse_metric(cell(row, metric_idx)) {
            acc.sum += value;
            acc.valid += 1;
        }
    }

    Ok(groups
        .into_iter()
        .filter_map(|(model_id, acc)| {
            let score = acc.mean()?;
            Some(ScoreRecord {
                model_id,
                dimension_id: spec.id.clone(),
                score,
                sample_count: acc.rows,
            })
        })
        .collect())
}

/// Merge per-dimension score records into one ranking per model.
///
/// Models are kept in first-seen order across the record stream, and the
/// sort is stable, so on an exact `avg_score` tie the earlier model takes
/// the better rank. `dimension_scores` is keyed by dimension id: a model
/// missing one dimension cannot shift its remaining scores onto the
/// wrong dimension.
pub fn merge_rankings(records: &[ScoreRecord], dimension_order: &[String]) -> Vec<ModelRanking> {
    let mut per_model: IndexMap<String, IndexMap<String, f64>> = IndexMap::new();

    for record in records {
        per_model
            .entry(record.model_id.clone())
            .or_default()
            .insert(record.dimension_id.clone(), record.score);
    }

    let mut rankings: Vec<ModelRanking> = per_model
        .into_iter()
        .map(|(model_id, scores)| {
            let avg_score = scores.values().sum::<f64>() / scores.len() as f64;

            let mut dimension_scores = IndexMap::new();
            for dimension_id in dimension_order {
                if let Some(score) = scores.get(dimension_id) {
                    dimension_scores.insert(dimension_id.clone(), *score);
                }
            }

            ModelRanking {
                model_id,
                avg_score,
                dimension_scores,
                rank: 0,
            }
        })
        .collect();

    // Sort by average score (best first); stable, so ties keep input order
    rankings.sort_by(|a, b| {
        b.avg_score
            .partial_cmp(&a.avg_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for (idx, ranking) in rankings.iter_mut().enumerate() {
        ranking.rank = idx + 1;
    }

    rankings
}

/// Assembly context for [`build_report`].
#[derive(Debug, Clone, Copy)]
pub struct ReportMeta<'a> {
    /// Date stamped into the document.
    pub last_updated: NaiveDate,
    /// Dataset counts, already adjusted for configured overrides.
    pub counts: ReportCounts,
    /// Configured dimensions, for display names.
    pub dimensions: &'a [DimensionSpec],
    /// Model catalog, for display names.
    pub models: &'a [ModelEntry],
}

/// Assemble the serializable leaderboard document.
///
/// Pure assembly over the outputs of [`compute_dimension_scores`] and
/// [`merge_rankings`]: display names are attached and counts copied in,
/// nothing is recomputed. A ranking that references a model with no score
/// record cannot come from those functions, so it aborts with
/// [`PipelineError::InvariantViolation`].
pub fn build_report(
    records: &[ScoreRecord],
    rankings: &[ModelRanking],
    meta: &ReportMeta<'_>,
) -> Result<LeaderboardReport, PipelineError> {
    for ranking in rankings {
        if !records
            .iter()
            .any(|record| record.model_id == ranking.model_id)
        {
            return Err(PipelineError::InvariantViolation(format!(
                "ranking references model '{}' with no score record",
                ranking.model_id
            )));
        }
    }

    let overall_rankings = rankings
        .iter()
        .map(|ranking| {
            let name = registry::model_display_name(meta.models, &ranking.model_id);
            RankingEntry::from_ranking(ranking, name)
        })
        .collect();

    let dimension_details = records
        .iter()
        .map(|record| {
            let model_name = registry::model_display_name(meta.models, &record.model_id);
            let dimension_name =
                registry::dimension_display_name(meta.dimensions, &record.dimension_id);
            DimensionDetail::from_record(record, model_name, &dimension_name)
        })
        .collect();

    Ok(LeaderboardReport {
        last_updated: meta.last_updated,
        total_scripts: meta.counts.total_scripts,
        total_evaluations: meta.counts.total_evaluations,
        models_evaluated: meta.counts.models_evaluated,
        dimensions: meta.counts.dimensions,
        overall_rankings,
        dimension_details,
    })
}

/// Accumulates distinct scripts and (model, script) pairs across the
/// processed tables.
#[derive(Debug, Default)]
pub struct CoverageTracker {
    scripts: BTreeSet<String>,
    evaluations: BTreeSet<(String, String)>,
}

impl CoverageTracker {
    /// Fold one processed table into the coverage counts. Tables without
    /// a `script_id` column contribute nothing.
    pub fn observe(&mut self, table: &MetricTable) {
        let Some(script_idx) = table.column_index(SCRIPT_COLUMN) else {
            return;
        };
        let model_idx = table.column_index(MODEL_COLUMN);

        for row in &table.rows {
            let script = cell(row, script_idx);
            if script.is_empty() {
                continue;
            }
            self.scripts.insert(script.to_string());

            if let Some(model_idx) = model_idx {
                let model = cell(row, model_idx);
                if !model.is_empty() {
                    self.evaluations
                        .insert((model.to_string(), script.to_string()));
                }
            }
        }
    }

    /// Finalize counts against the merged outputs.
    pub fn counts(&self, records: &[ScoreRecord], rankings: &[ModelRanking]) -> ReportCounts {
        let dimensions = records
            .iter()
            .map(|record| record.dimension_id.as_str())
            .collect::<BTreeSet<_>>()
            .len();

        ReportCounts {
            total_scripts: self.scripts.len(),
            total_evaluations: self.evaluations.len(),
            models_evaluated: rankings.len(),
            dimensions,
        }
    }
}

fn cell<'a>(row: &'a [String], idx: usize) -> &'a str {
    row.get(idx).map(String::as_str).unwrap_or("").trim()
}

fn missing_input(spec: &DimensionSpec, table: &MetricTable, source: TableError) -> PipelineError {
    PipelineError::MissingInput {
        dimension: spec.id.clone(),
        path: table.path.clone(),
        source,
    }
}
