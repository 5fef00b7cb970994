//! Per-record operation outcomes.

use serde::ser::{Serialize, Serializer};

use crate::error::OperationError;

/// Identifier reported for dry-run previews.
pub const DRY_RUN_NUMBER: u64 = 0;
/// Reference reported for dry-run previews.
pub const DRY_RUN_URL: &str = "dry-run";

/// What happened when a record was processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// The issue was created.
    Created {
        /// Remote-assigned issue number.
        number: u64,
        /// Locator returned by the tracker.
        url: String,
    },
    /// Dry run: the issue would have been created. No operation was attempted.
    Planned,
    /// The operation failed, or succeeded with an unusable locator.
    Failed {
        /// Why the record failed.
        error: OperationError,
    },
}

/// Result of processing one record. Built once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationOutcome {
    /// Title echoed from the record for correlation.
    pub title: String,
    /// What happened.
    pub status: OutcomeStatus,
}

impl OperationOutcome {
    /// A created issue.
    #[must_use]
    pub fn created(title: impl Into<String>, number: u64, url: impl Into<String>) -> Self {
        Self { title: title.into(), status: OutcomeStatus::Created { number, url: url.into() } }
    }

    /// A dry-run preview.
    #[must_use]
    pub fn planned(title: impl Into<String>) -> Self {
        Self { title: title.into(), status: OutcomeStatus::Planned }
    }

    /// A failed operation.
    #[must_use]
    pub fn failed(title: impl Into<String>, error: OperationError) -> Self {
        Self { title: title.into(), status: OutcomeStatus::Failed { error } }
    }

    /// Returns `true` only for issues that were actually created.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        matches!(self.status, OutcomeStatus::Created { .. })
    }

    /// Returns `true` when the operation failed.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self.status, OutcomeStatus::Failed { .. })
    }

    /// Issue number; the dry-run sentinel for previews, `None` on failure.
    #[must_use]
    pub fn identifier(&self) -> Option<u64> {
        match &self.status {
            OutcomeStatus::Created { number, .. } => Some(*number),
            OutcomeStatus::Planned => Some(DRY_RUN_NUMBER),
            OutcomeStatus::Failed { .. } => None,
        }
    }

    /// Issue locator; the dry-run sentinel for previews, `None` on failure.
    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        match &self.status {
            OutcomeStatus::Created { url, .. } => Some(url),
            OutcomeStatus::Planned => Some(DRY_RUN_URL),
            OutcomeStatus::Failed { .. } => None,
        }
    }

    /// The failure, if any.
    #[must_use]
    pub fn error(&self) -> Option<&OperationError> {
        match &self.status {
            OutcomeStatus::Failed { error } => Some(error),
            _ => None,
        }
    }

    /// Diagnostic text for failed outcomes.
    #[must_use]
    pub fn error_detail(&self) -> Option<String> {
        self.error().map(ToString::to_string)
    }
}

/// Wire layout of one entry in the summary file's `results` array.
#[derive(serde::Serialize)]
struct OutcomeRecord<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Serialize for OperationOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let success = match self.status {
            OutcomeStatus::Created { .. } => Some(true),
            OutcomeStatus::Planned => None,
            OutcomeStatus::Failed { .. } => Some(false),
        };
        OutcomeRecord {
            number: self.identifier(),
            url: self.reference(),
            title: &self.title,
            success,
            error: self.error_detail(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn created_serializes_with_success_true() {
        let outcome = OperationOutcome::created("A", 42, "https://github.com/o/r/issues/42");
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({
                "number": 42,
                "url": "https://github.com/o/r/issues/42",
                "title": "A",
                "success": true
            })
        );
    }

    #[test]
    fn failed_serializes_with_error() {
        let outcome = OperationOutcome::failed("B", OperationError::Failed("rate limited".into()));
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"title": "B", "success": false, "error": "rate limited"})
        );
    }

    #[test]
    fn malformed_reference_stays_distinguishable() {
        let outcome =
            OperationOutcome::failed("C", OperationError::MalformedReference("created".into()));
        assert!(outcome.is_failure());
        assert!(matches!(
            outcome.error(),
            Some(OperationError::MalformedReference(locator)) if locator == "created"
        ));
        assert_eq!(
            outcome.error_detail().as_deref(),
            Some("malformed reference from issue tracker: \"created\"")
        );
    }

    #[test]
    fn planned_carries_sentinels_without_success_flag() {
        let outcome = OperationOutcome::planned("C");
        assert!(!outcome.succeeded());
        assert!(!outcome.is_failure());
        assert!(outcome.error().is_none());
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"number": 0, "url": "dry-run", "title": "C"})
        );
    }
}
