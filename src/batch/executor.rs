//! Sequential batch execution.
//!
//! Records run strictly in input order, one tracker call each. A failure is
//! captured into that record's outcome and the loop moves on, so the output
//! always has exactly one outcome per input record.

use tracing::{debug, info};

use super::outcome::OperationOutcome;
use crate::error::OperationError;
use crate::ports::{IssueDraft, IssueTracker};
use crate::record::RecordSpec;

/// Run options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecuteOptions {
    /// Target `owner/name`; `None` leaves the choice to the tracker.
    pub repo: Option<String>,
    /// Preview only: never call the tracker.
    pub dry_run: bool,
}

/// Position of a record within the running batch.
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    /// 1-based index.
    pub index: usize,
    /// Number of records in the batch.
    pub total: usize,
    /// The record being processed.
    pub record: &'a RecordSpec,
}

/// Receives live notifications while a batch runs.
pub trait BatchObserver {
    /// Called before a record is processed.
    fn record_started(&mut self, progress: Progress<'_>);

    /// Called once the record's outcome is known.
    fn record_finished(&mut self, progress: Progress<'_>, outcome: &OperationOutcome);
}

/// Observer that ignores every notification.
pub struct SilentObserver;

impl BatchObserver for SilentObserver {
    fn record_started(&mut self, _progress: Progress<'_>) {}

    fn record_finished(&mut self, _progress: Progress<'_>, _outcome: &OperationOutcome) {}
}

/// Parse the issue number from a tracker locator's final path segment.
///
/// # Errors
///
/// Returns [`OperationError::MalformedReference`] when the segment is not a
/// base-10 integer.
pub fn parse_reference(locator: &str) -> Result<u64, OperationError> {
    locator
        .trim()
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse::<u64>().ok())
        .ok_or_else(|| OperationError::MalformedReference(locator.to_string()))
}

/// Create one issue per record, in order.
///
/// The returned vector has the same length and order as `records`.
pub fn execute(
    tracker: &dyn IssueTracker,
    records: &[RecordSpec],
    options: &ExecuteOptions,
    observer: &mut dyn BatchObserver,
) -> Vec<OperationOutcome> {
    let total = records.len();
    let mut outcomes = Vec::with_capacity(total);

    for (i, record) in records.iter().enumerate() {
        let progress = Progress { index: i + 1, total, record };
        observer.record_started(progress);

        let outcome = if options.dry_run {
            OperationOutcome::planned(&record.title)
        } else {
            attempt(tracker, record, options.repo.as_deref())
        };

        // Record failures belong to the caller's report; log them at info.
        match outcome.error() {
            Some(error) => info!(
                index = progress.index,
                total,
                title = %record.title,
                %error,
                "issue failed"
            ),
            None => info!(
                index = progress.index,
                total,
                title = %record.title,
                number = ?outcome.identifier(),
                "issue processed"
            ),
        }

        observer.record_finished(progress, &outcome);
        outcomes.push(outcome);
    }

    outcomes
}

fn attempt(
    tracker: &dyn IssueTracker,
    record: &RecordSpec,
    repo: Option<&str>,
) -> OperationOutcome {
    let draft = IssueDraft {
        title: &record.title,
        body: &record.body,
        labels: &record.labels,
        assignees: &record.assignees,
        milestone: record.milestone.as_deref(),
        repo,
    };
    debug!(title = %record.title, ?repo, "creating issue");

    let result = tracker
        .create_issue(&draft)
        .map_err(|e| OperationError::Failed(e.to_string()))
        .and_then(|locator| parse_reference(&locator).map(|number| (number, locator)));

    match result {
        Ok((number, url)) => OperationOutcome::created(&record.title, number, url.trim()),
        Err(err) => OperationOutcome::failed(&record.title, err),
    }
}
