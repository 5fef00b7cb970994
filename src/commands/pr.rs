//! `ghbatch pr` command.

use tracing::info;

use crate::context::ServiceContext;
use crate::error::AppError;
use crate::pull::{prepare, submit, PullRequestPlan};

/// Execute the `pr` command.
///
/// # Errors
///
/// Returns an error if an issue cannot be fetched or the pull request
/// cannot be created.
pub fn run(ctx: &ServiceContext, plan: &PullRequestPlan, dry_run: bool) -> Result<(), AppError> {
    let prepared = prepare(ctx.issues.as_ref(), plan)?;
    for issue in &prepared.issues {
        println!("Issue #{}: {}", issue.number, issue.title);
    }

    if dry_run {
        println!();
        println!("[DRY RUN] Would create PR:");
        println!("  Title: {}", prepared.title);
        println!("  Base: {}", plan.base);
        println!("  Draft: {}", if plan.draft { "Yes" } else { "No" });
        println!();
        println!("{}", prepared.body);
        return Ok(());
    }

    let created = submit(ctx.issues.as_ref(), plan, &prepared)?;
    info!(number = created.number, url = %created.url, "pull request created");

    let linked: Vec<String> = plan.issues.iter().map(|n| format!("#{n}")).collect();
    println!();
    println!("✓ PR created successfully!");
    println!("  URL: {}", created.url);
    println!("  Number: #{}", created.number);
    println!("  Title: {}", created.title);
    println!("  Draft: {}", if plan.draft { "Yes" } else { "No" });
    println!("  Linked issues: {}", linked.join(", "));
    Ok(())
}
