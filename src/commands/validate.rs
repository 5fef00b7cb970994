//! `ghbatch validate` command.

use std::fmt::Write;
use std::path::Path;

use crate::context::ServiceContext;
use crate::error::AppError;
use crate::load;
use crate::record::Format;
use crate::validate::{validate, ValidationReport};

/// Execute the `validate` command.
///
/// # Errors
///
/// Returns an error if the input cannot be loaded or any record is invalid.
pub fn run(ctx: &ServiceContext, input: &Path, format: Option<Format>) -> Result<(), AppError> {
    let loaded = load::load_file(ctx.fs.as_ref(), input, format)?;
    println!("Validating {} ({})...", input.display(), loaded.format.name());
    println!();

    let report = validate(&loaded.records);
    print!("{}", format_report(&report));

    if report.is_valid() {
        println!("✓ Validation passed");
        Ok(())
    } else {
        println!("✗ Validation failed");
        Err(AppError::ValidationFailed { count: report.errors.len() })
    }
}

/// Render errors and warnings as indented lists, each followed by a blank line.
#[must_use]
pub fn format_report(report: &ValidationReport) -> String {
    let mut out = String::new();
    if !report.errors.is_empty() {
        out.push_str("Errors:\n");
        for error in &report.errors {
            let _ = writeln!(out, "  ✗ {error}");
        }
        out.push('\n');
    }
    if !report.warnings.is_empty() {
        out.push_str("Warnings:\n");
        for warning in &report.warnings {
            let _ = writeln!(out, "  ⚠ {warning}");
        }
        out.push('\n');
    }
    out
}
