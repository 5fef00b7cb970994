//! Field-level validation and the execution gate.
//!
//! Validation never edits a record. The same per-record check yields either
//! the errors for that record or its [`RecordSpec`], so a batch that passes
//! [`validate`] always converts in [`gate`].

use serde_json::Value;

use crate::record::{RawRecord, RecordSpec};

/// Aggregated validation result for a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Hard errors, each prefixed with `Issue N:`.
    pub errors: Vec<String>,
    /// Advisory messages that never block execution.
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Returns `true` when there are no errors.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate every record and compute batch-level warnings.
#[must_use]
pub fn validate(records: &[RawRecord]) -> ValidationReport {
    let mut report = ValidationReport::default();
    for (i, record) in records.iter().enumerate() {
        if let Err(errors) = check_record(i + 1, record) {
            report.errors.extend(errors);
        }
    }
    report.warnings = batch_warnings(records);
    report
}

/// Convert the batch into specs only if every record is valid.
///
/// # Errors
///
/// Returns the full report when any record has an error; nothing is converted.
pub fn gate(
    records: &[RawRecord],
) -> Result<(Vec<RecordSpec>, ValidationReport), ValidationReport> {
    let mut specs = Vec::with_capacity(records.len());
    let mut report = ValidationReport::default();
    for (i, record) in records.iter().enumerate() {
        match check_record(i + 1, record) {
            Ok(spec) => specs.push(spec),
            Err(errors) => report.errors.extend(errors),
        }
    }
    report.warnings = batch_warnings(records);

    if report.is_valid() {
        Ok((specs, report))
    } else {
        Err(report)
    }
}

fn check_record(index: usize, record: &RawRecord) -> Result<RecordSpec, Vec<String>> {
    let prefix = format!("Issue {index}");
    let Some(map) = record.value().as_object() else {
        return Err(vec![format!("{prefix}: record must be an object")]);
    };

    let mut errors = Vec::new();
    let title = required_text(map.get("title"), "title", &prefix, &mut errors);
    let body = required_text(map.get("body"), "body", &prefix, &mut errors);
    let labels = string_list(
        map.get("labels"),
        "labels",
        "All labels must be strings",
        &prefix,
        &mut errors,
    );
    let assignees = string_list(
        map.get("assignees"),
        "assignees",
        "All assignees must be strings",
        &prefix,
        &mut errors,
    );
    let milestone = match map.get("milestone") {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(format!("{prefix}: 'milestone' must be string"));
            None
        }
    };

    match (title, body) {
        (Some(title), Some(body)) if errors.is_empty() => {
            Ok(RecordSpec::new(title, body, labels, assignees, milestone))
        }
        _ => Err(errors),
    }
}

fn required_text(
    value: Option<&Value>,
    field: &str,
    prefix: &str,
    errors: &mut Vec<String>,
) -> Option<String> {
    match value {
        None => {
            errors.push(format!("{prefix}: Missing '{field}'"));
            None
        }
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(_) => {
            errors.push(format!("{prefix}: '{field}' must be non-empty string"));
            None
        }
    }
}

fn string_list(
    value: Option<&Value>,
    field: &str,
    element_message: &str,
    prefix: &str,
    errors: &mut Vec<String>,
) -> Vec<String> {
    match value {
        None => Vec::new(),
        Some(Value::Array(items)) => {
            let strings: Vec<String> =
                items.iter().filter_map(|v| v.as_str().map(str::to_string)).collect();
            if strings.len() != items.len() {
                errors.push(format!("{prefix}: {element_message}"));
            }
            strings
        }
        Some(_) => {
            errors.push(format!("{prefix}: '{field}' must be array"));
            Vec::new()
        }
    }
}

fn batch_warnings(records: &[RawRecord]) -> Vec<String> {
    let mut warnings = Vec::new();
    if records.is_empty() {
        warnings.push("No issues found in input".to_string());
    }

    let titles: Vec<&str> =
        records.iter().filter_map(RawRecord::title).filter(|t| !t.is_empty()).collect();
    let mut duplicates: Vec<&str> = Vec::new();
    for (i, title) in titles.iter().enumerate() {
        if titles[..i].contains(title) && !duplicates.contains(title) {
            duplicates.push(title);
        }
    }
    if !duplicates.is_empty() {
        warnings.push(format!("Duplicate titles found: {}", duplicates.join(", ")));
    }
    warnings
}
