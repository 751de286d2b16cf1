//! Statistics document generation.
//!
//! The dashboard's About panel reads a second document describing the
//! dataset and the evaluation setup. Everything here comes from
//! configuration plus the counts derived during aggregation.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::models::ReportCounts;
use crate::registry::{DimensionSpec, EvalKind, ModelEntry};

/// Dataset overview block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Overview {
    /// Distinct scripts covered by the evaluation.
    pub total_scripts: usize,
    /// Distinct (model, script) evaluation pairs.
    pub total_evaluations: usize,
    /// Models present in the ranking.
    pub models_evaluated: usize,
    /// Dimensions that contributed scores.
    pub dimensions: usize,
    /// Average script length in lines.
    pub avg_script_length: usize,
    /// Evaluation window, e.g. `2025-12-16 to 2025-12-20`.
    pub evaluation_period: String,
}

/// Dimension metadata as the dashboard displays it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionInfo {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Labeling method.
    #[serde(rename = "type")]
    pub kind: EvalKind,
    /// Human-readable metric names.
    pub key_metrics: Vec<String>,
}

impl DimensionInfo {
    /// Creates display metadata from a dimension spec.
    fn from_spec(spec: &DimensionSpec) -> Self {
        Self {
            id: spec.id.clone(),
            name: spec.display_name(),
            description: spec.description.clone(),
            kind: spec.kind,
            key_metrics: spec.key_metrics.clone(),
        }
    }
}

/// The complete statistics document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsDoc {
    /// Dataset overview.
    pub overview: Overview,
    /// Configured dimensions with display metadata.
    pub dimensions: Vec<DimensionInfo>,
    /// Model catalog.
    pub models: Vec<ModelEntry>,
}

/// Build the statistics document from configuration and derived counts.
pub fn build_statistics(config: &Config, counts: &ReportCounts) -> StatisticsDoc {
    StatisticsDoc {
        overview: Overview {
            total_scripts: counts.total_scripts,
            total_evaluations: counts.total_evaluations,
            models_evaluated: counts.models_evaluated,
            dimensions: counts.dimensions,
            avg_script_length: config.report.avg_script_length,
            evaluation_period: config.report.evaluation_period.clone(),
        },
        dimensions: config.dimensions.iter().map(DimensionInfo::from_spec).collect(),
        models: config.models.clone(),
    }
}
