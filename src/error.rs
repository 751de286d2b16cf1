//! Error taxonomy for the aggregation pipeline.
//!
//! Two failure classes exist: per-dimension input problems, which are
//! recoverable (the dimension is skipped and processing continues), and
//! internal consistency violations, which are fatal because they indicate
//! a programming error rather than bad input.

use std::path::PathBuf;

use crate::table::TableError;

/// Errors surfaced by the aggregation pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A configured metric table or one of its required columns is absent.
    ///
    /// Callers skip the affected dimension with a warning and keep
    /// processing the remaining dimensions.
    #[error("dimension '{dimension}' ({}): {source}", .path.display())]
    MissingInput {
        /// Dimension whose input could not be used.
        dimension: String,
        /// Path of the metric table that was expected.
        path: PathBuf,
        /// What exactly was wrong with it.
        #[source]
        source: TableError,
    },

    /// An internal consistency check failed.
    ///
    /// Aborts report generation: the ranking and record streams are built
    /// from the same tables, so a mismatch cannot come from input data.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl PipelineError {
    /// Whether the caller may skip the affected dimension and continue.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PipelineError::MissingInput { .. })
    }
}
