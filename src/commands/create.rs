//! `ghbatch create` command.

use std::path::Path;

use crate::batch::{
    execute, format_summary, persist, summarize, BatchObserver, ExecuteOptions,
    OperationOutcome, OutcomeStatus, Progress,
};
use crate::context::ServiceContext;
use crate::error::AppError;
use crate::load;
use crate::record::Format;
use crate::validate::gate;

use super::validate::format_report;

/// Arguments for a batch run.
#[derive(Debug, Clone)]
pub struct CreateOptions<'a> {
    /// Input file.
    pub input: &'a Path,
    /// Explicit input format.
    pub format: Option<Format>,
    /// Target repository.
    pub repo: Option<String>,
    /// Preview without creating issues.
    pub dry_run: bool,
    /// Where to write the JSON summary.
    pub output: Option<&'a Path>,
}

/// Prints live per-record feedback.
struct ConsoleObserver {
    dry_run: bool,
}

impl BatchObserver for ConsoleObserver {
    fn record_started(&mut self, progress: Progress<'_>) {
        let record = progress.record;
        println!();
        println!("[{}/{}] Creating issue: {}", progress.index, progress.total, record.title);
        if self.dry_run {
            println!("[DRY RUN] Would create issue: {}", record.title);
            println!("  Labels: {}", record.labels.join(", "));
            println!("  Assignees: {}", record.assignees.join(", "));
            if let Some(milestone) = &record.milestone {
                println!("  Milestone: {milestone}");
            }
        }
    }

    fn record_finished(&mut self, _progress: Progress<'_>, outcome: &OperationOutcome) {
        match &outcome.status {
            OutcomeStatus::Created { url, .. } => println!("  ✓ Created: {url}"),
            OutcomeStatus::Failed { error } => {
                eprintln!("  ✗ Failed: {}", error.to_string().trim_end());
            }
            OutcomeStatus::Planned => {}
        }
    }
}

/// Execute the `create` command.
///
/// Nothing is sent to the tracker unless every record validates.
///
/// # Errors
///
/// Returns an error if loading or validation fails, the summary cannot be
/// written, or any record failed.
pub fn run(ctx: &ServiceContext, options: &CreateOptions<'_>) -> Result<(), AppError> {
    let loaded = load::load_file(ctx.fs.as_ref(), options.input, options.format)?;
    println!(
        "Loaded {} issue(s) from {} ({})",
        loaded.records.len(),
        options.input.display(),
        loaded.format.name()
    );

    let (records, report) = match gate(&loaded.records) {
        Ok(passed) => passed,
        Err(report) => {
            eprintln!();
            eprintln!("Validation errors:");
            for error in &report.errors {
                eprintln!("  - {error}");
            }
            return Err(AppError::ValidationFailed { count: report.errors.len() });
        }
    };
    if !report.warnings.is_empty() {
        println!();
        print!("{}", format_report(&report));
    }

    let exec = ExecuteOptions { repo: options.repo.clone(), dry_run: options.dry_run };
    let mut observer = ConsoleObserver { dry_run: options.dry_run };
    let summary = summarize(execute(ctx.issues.as_ref(), &records, &exec, &mut observer));

    println!();
    println!("{}", format_summary(&summary));

    if let Some(path) = options.output {
        persist(ctx.fs.as_ref(), &summary, path)?;
        println!();
        println!("Results saved to: {}", path.display());
    }

    if summary.all_succeeded() {
        Ok(())
    } else {
        Err(AppError::BatchIncomplete {
            failed: summary.failed_count,
            total: summary.total_requested,
        })
    }
}
