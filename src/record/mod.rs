//! Record types flowing through the batch engine.
//!
//! A [`RawRecord`] is the untrusted, freshly decoded document. Only the
//! validator turns it into a [`RecordSpec`], so anything holding a
//! `RecordSpec` has passed field-level checks.

use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Input file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// JSON: a bare array of records or `{"issues": [...]}`.
    #[value(name = "json")]
    Structured,
    /// CSV with a header row.
    #[value(name = "csv")]
    Tabular,
}

impl Format {
    /// Infer the format from a file extension (case-insensitive).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Structured),
            "csv" => Some(Self::Tabular),
            _ => None,
        }
    }

    /// Short name used in console output.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Structured => "json",
            Self::Tabular => "csv",
        }
    }
}

/// A decoded but unvalidated record document.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord(Value);

impl RawRecord {
    /// Wrap a decoded JSON value.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The underlying document.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.0
    }

    /// Field lookup; `None` when the record is not an object or lacks the key.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.as_object().and_then(|map| map.get(name))
    }

    /// The `title` field when it is a string.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.field("title").and_then(Value::as_str)
    }
}

/// One issue to create. Immutable once built by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSpec {
    /// Issue title; never blank.
    pub title: String,
    /// Issue body; never blank.
    pub body: String,
    /// Labels, in first-seen order, without duplicates.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Assignee logins, in input order.
    #[serde(default)]
    pub assignees: Vec<String>,
    /// Milestone title.
    #[serde(default)]
    pub milestone: Option<String>,
}

impl RecordSpec {
    pub(crate) fn new(
        title: String,
        body: String,
        labels: Vec<String>,
        assignees: Vec<String>,
        milestone: Option<String>,
    ) -> Self {
        let mut unique = Vec::with_capacity(labels.len());
        for label in labels {
            if !unique.contains(&label) {
                unique.push(label);
            }
        }
        Self { title, body, labels: unique, assignees, milestone }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn infers_format_from_extension() {
        assert_eq!(Format::from_path(Path::new("issues.json")), Some(Format::Structured));
        assert_eq!(Format::from_path(Path::new("ISSUES.CSV")), Some(Format::Tabular));
        assert_eq!(Format::from_path(Path::new("issues.yaml")), None);
        assert_eq!(Format::from_path(Path::new("issues")), None);
    }

    #[test]
    fn labels_are_deduplicated_in_first_seen_order() {
        let spec = RecordSpec::new(
            "t".into(),
            "b".into(),
            vec!["bug".into(), "ui".into(), "bug".into()],
            vec![],
            None,
        );
        assert_eq!(spec.labels, vec!["bug", "ui"]);
    }

    #[test]
    fn raw_record_field_access() {
        let raw = RawRecord::new(json!({"title": "A", "body": 3}));
        assert_eq!(raw.title(), Some("A"));
        assert_eq!(raw.field("body"), Some(&json!(3)));
        assert!(RawRecord::new(json!("not an object")).title().is_none());
    }
}
