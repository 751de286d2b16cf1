//! In-memory metric tables.
//!
//! Each evaluation dimension publishes one CSV file with a header row.
//! Tables are small (low thousands of rows), so a table is read whole and
//! its columns are addressed by header name. Cell values stay as strings;
//! numeric parsing happens at the point of use so that an unparseable cell
//! can be treated as missing instead of aborting the run.

use std::path::{Path, PathBuf};

use tracing::warn;

/// Problems loading or addressing a metric table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("file has no header row")]
    EmptyTable,

    #[error("missing required column '{0}'")]
    MissingColumn(String),
}

/// One dimension's metric table, fully loaded.
#[derive(Debug, Clone)]
pub struct MetricTable {
    /// Where the table was read from.
    pub path: PathBuf,
    /// Header row, in file order.
    pub columns: Vec<String>,
    /// Data rows. A row may be shorter than the header when trailing
    /// cells are absent; lookups treat missing cells as empty.
    pub rows: Vec<Vec<String>>,
}

impl MetricTable {
    /// Load a table from a CSV file.
    ///
    /// The format is the plain comma-separated layout the evaluation jobs
    /// emit: first non-blank line is the header, no quoting, blank lines
    /// skipped.
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let content = std::fs::read_to_string(path)?;
        let mut lines = content.lines();

        let header = loop {
            match lines.next() {
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => break line,
                None => return Err(TableError::EmptyTable),
            }
        };
        // Spreadsheet exports prepend a byte-order mark.
        let header = header.trim_start_matches('\u{feff}');
        let columns: Vec<String> = split_line(header);

        let mut rows = Vec::new();
        for (line_no, line) in lines.enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let row = split_line(line);
            if row.len() > columns.len() {
                warn!(
                    "{}: line {} has {} cells for {} columns",
                    path.display(),
                    line_no + 2,
                    row.len(),
                    columns.len()
                );
            }
            rows.push(row);
        }

        Ok(MetricTable {
            path: path.to_path_buf(),
            columns,
            rows,
        })
    }

    /// Index of a named column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Index of a named column, or a `MissingColumn` error.
    pub fn require_column(&self, name: &str) -> Result<usize, TableError> {
        self.column_index(name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }
}

fn split_line(line: &str) -> Vec<String> {
    line.split(',').map(|cell| cell.trim().to_string()).collect()
}

/// Parse one metric cell.
///
/// Empty, unparseable, and non-finite values are all treated as missing;
/// a `NaN` or `inf` cell would otherwise poison every mean it touches.
pub fn parse_metric(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_table(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_table() {
        let dir = TempDir::new().unwrap();
        let path = write_table(
            &dir,
            "format_standards_metrics.csv",
            "model,script_id,format_error_rate\nclaude-opus-4.5,s001,0.12\ngpt-5.2,s001,0.30\n",
        );

        let table = MetricTable::load(&path).unwrap();
        assert_eq!(
            table.columns,
            vec!["model", "script_id", "format_error_rate"]
        );
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0], "claude-opus-4.5");
        assert_eq!(table.rows[1][2], "0.30");
    }

    #[test]
    fn test_load_skips_blank_lines_and_strips_bom() {
        let dir = TempDir::new().unwrap();
        let path = write_table(
            &dir,
            "metrics.csv",
            "\u{feff}model,score\n\nm1,0.5\n   \nm2,0.7\n",
        );

        let table = MetricTable::load(&path).unwrap();
        assert_eq!(table.columns, vec!["model", "score"]);
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = MetricTable::load(&dir.path().join("absent.csv"));
        assert!(matches!(result, Err(TableError::Io(_))));
    }

    #[test]
    fn test_load_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = write_table(&dir, "empty.csv", "");
        let result = MetricTable::load(&path);
        assert!(matches!(result, Err(TableError::EmptyTable)));
    }

    #[test]
    fn test_require_column() {
        let dir = TempDir::new().unwrap();
        let path = write_table(&dir, "metrics.csv", "model,enr\nm1,0.5\n");
        let table = MetricTable::load(&path).unwrap();

        assert_eq!(table.require_column("enr").unwrap(), 1);
        let err = table.require_column("ooc_rate").unwrap_err();
        assert!(err.to_string().contains("ooc_rate"));
    }

    #[test]
    fn test_short_rows_are_kept() {
        let dir = TempDir::new().unwrap();
        let path = write_table(&dir, "metrics.csv", "model,script_id,score\nm1,s001\n");
        let table = MetricTable::load(&path).unwrap();

        assert_eq!(table.rows[0].len(), 2);
        assert_eq!(table.rows[0].get(2), None);
    }

    #[test]
    fn test_parse_metric() {
        assert_eq!(parse_metric("0.5"), Some(0.5));
        assert_eq!(parse_metric(" 1.25 "), Some(1.25));
        assert_eq!(parse_metric("-3"), Some(-3.0));
        assert_eq!(parse_metric(""), None);
        assert_eq!(parse_metric("   "), None);
        assert_eq!(parse_metric("n/a"), None);
        assert_eq!(parse_metric("NaN"), None);
        assert_eq!(parse_metric("inf"), None);
    }
}
