//! Batch summary aggregation and persistence.

use std::fmt::Write;
use std::path::Path;

use serde::Serialize;

use super::outcome::OperationOutcome;
use crate::error::ReportError;
use crate::ports::filesystem::FileSystem;

/// Aggregate of a full run.
///
/// `succeeded_count + failed_count == total_requested` always holds; dry-run
/// previews count as succeeded since nothing failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Number of records in the batch.
    #[serde(rename = "total")]
    pub total_requested: usize,
    /// Records that did not fail.
    #[serde(rename = "successful")]
    pub succeeded_count: usize,
    /// Records whose operation failed.
    #[serde(rename = "failed")]
    pub failed_count: usize,
    /// One outcome per record, in input order.
    #[serde(rename = "results")]
    pub outcomes: Vec<OperationOutcome>,
}

impl BatchSummary {
    /// Returns `true` when no record failed.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failed_count == 0
    }
}

/// Count outcomes into a summary. Pure.
#[must_use]
pub fn summarize(outcomes: Vec<OperationOutcome>) -> BatchSummary {
    let failed_count = outcomes.iter().filter(|o| o.is_failure()).count();
    BatchSummary {
        total_requested: outcomes.len(),
        succeeded_count: outcomes.len() - failed_count,
        failed_count,
        outcomes,
    }
}

/// Write the summary as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn persist(
    fs: &dyn FileSystem,
    summary: &BatchSummary,
    path: &Path,
) -> Result<(), ReportError> {
    let json = serde_json::to_string_pretty(summary)?;
    fs.write(path, &json).map_err(|source| ReportError::Write { path: path.to_path_buf(), source })
}

/// Render the console summary block.
#[must_use]
pub fn format_summary(summary: &BatchSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(out, "Summary:");
    let _ = writeln!(out, "  Total: {}", summary.total_requested);
    let _ = writeln!(out, "  Successful: {}", summary.succeeded_count);
    let _ = write!(out, "  Failed: {}", summary.failed_count);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::filesystem::LiveFileSystem;
    use crate::error::OperationError;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn mixed() -> Vec<OperationOutcome> {
        vec![
            OperationOutcome::created("A", 42, "https://github.com/o/r/issues/42"),
            OperationOutcome::failed("B", OperationError::Failed("rate limited".into())),
        ]
    }

    #[test]
    fn counts_add_up() {
        let summary = summarize(mixed());
        assert_eq!(summary.total_requested, 2);
        assert_eq!(summary.succeeded_count, 1);
        assert_eq!(summary.failed_count, 1);
        assert_eq!(summary.succeeded_count + summary.failed_count, summary.total_requested);
        assert!(!summary.all_succeeded());
    }

    #[test]
    fn empty_batch_summary() {
        let summary = summarize(Vec::new());
        assert_eq!(summary.total_requested, 0);
        assert!(summary.all_succeeded());
    }

    #[test]
    fn dry_run_previews_count_as_successful() {
        let summary =
            summarize(vec![OperationOutcome::planned("A"), OperationOutcome::planned("B")]);
        assert_eq!(summary.succeeded_count, 2);
        assert_eq!(summary.failed_count, 0);
    }

    #[test]
    fn persisted_layout_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        persist(&LiveFileSystem, &summarize(mixed()), &path).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            written,
            json!({
                "total": 2,
                "successful": 1,
                "failed": 1,
                "results": [
                    {
                        "number": 42,
                        "url": "https://github.com/o/r/issues/42",
                        "title": "A",
                        "success": true
                    },
                    {"title": "B", "success": false, "error": "rate limited"}
                ]
            })
        );
    }

    #[test]
    fn console_block_lists_counts() {
        let text = format_summary(&summarize(mixed()));
        assert!(text.starts_with("====="));
        assert!(text.contains("  Total: 2"));
        assert!(text.contains("  Successful: 1"));
        assert!(text.ends_with("  Failed: 1"));
    }
}
