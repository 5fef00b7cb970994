//! Command dispatch and handlers.

pub mod create;
pub mod pr;
pub mod validate;

use crate::cli::Command;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::AppError;

/// Dispatch a parsed command to its handler.
///
/// `GHBATCH_REPLAY=<file>` answers tracker calls from a cassette;
/// `GHBATCH_RECORD=<file>` captures them from a live session.
///
/// # Errors
///
/// Returns an error if the selected command handler fails.
pub fn dispatch(command: &Command, config: &Config) -> Result<(), AppError> {
    let ctx = ServiceContext::from_env(config).map_err(AppError::Session)?;
    let result = dispatch_with_context(command, config, &ctx);

    // Write the cassette even when the command failed.
    if let Some(path) = ctx.finish().map_err(AppError::Session)? {
        eprintln!("Recording saved to: {}", path.display());
    }

    result
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error if the selected command handler fails.
pub fn dispatch_with_context(
    command: &Command,
    config: &Config,
    ctx: &ServiceContext,
) -> Result<(), AppError> {
    match command {
        Command::Create { input, repo, dry_run, output } => {
            let options = create::CreateOptions {
                input: &input.input,
                format: input.format,
                repo: repo.clone().or_else(|| config.repo.clone()),
                dry_run: *dry_run,
                output: output.as_deref(),
            };
            create::run(ctx, &options)
        }
        Command::Validate { input } => validate::run(ctx, &input.input, input.format),
        Command::Pr { issue, title, body, base, draft, repo, dry_run } => {
            let plan = crate::pull::PullRequestPlan {
                issues: crate::pull::parse_issue_numbers(issue)?,
                title: title.clone(),
                body: body.clone(),
                base: base.clone().unwrap_or_else(|| config.base_branch.clone()),
                draft: *draft,
                repo: repo.clone().or_else(|| config.repo.clone()),
            };
            pr::run(ctx, &plan, *dry_run)
        }
    }
}
