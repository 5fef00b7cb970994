//! Open a pull request that closes one or more existing issues.

use thiserror::Error;
use tracing::debug;

use crate::batch::parse_reference;
use crate::error::OperationError;
use crate::ports::{Issue, IssueTracker, PullRequestDraft};

/// Issue bodies longer than this are truncated in multi-issue summaries.
const SUMMARY_BODY_LIMIT: usize = 200;

/// Pull request workflow errors.
#[derive(Debug, Error)]
pub enum PullError {
    /// The issue list is not a comma-separated list of numbers.
    #[error("--issue must be number(s), e.g. 123 or 123,124,125 (got {0:?})")]
    InvalidIssueList(String),

    /// An issue could not be fetched.
    #[error("Error fetching issue #{number}: {detail}")]
    FetchIssue {
        /// The issue number.
        number: u64,
        /// The tracker's diagnostic.
        detail: String,
    },

    /// The tracker refused to create the pull request.
    #[error("Failed to create PR: {0}")]
    Create(String),

    /// The pull request was created but its locator has no number.
    #[error(transparent)]
    Reference(#[from] OperationError),
}

/// What the caller asked for.
#[derive(Debug, Clone, Default)]
pub struct PullRequestPlan {
    /// Issues to link.
    pub issues: Vec<u64>,
    /// Explicit title; generated when `None`.
    pub title: Option<String>,
    /// Extra text placed above the issue references.
    pub body: Option<String>,
    /// Branch to merge into.
    pub base: String,
    /// Open as a draft.
    pub draft: bool,
    /// Target `owner/name`.
    pub repo: Option<String>,
}

/// A pull request ready to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedPullRequest {
    /// The linked issues, as fetched.
    pub issues: Vec<Issue>,
    /// Final title.
    pub title: String,
    /// Final body.
    pub body: String,
}

/// A created pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPullRequest {
    /// Pull request number.
    pub number: u64,
    /// Locator returned by the tracker.
    pub url: String,
    /// Title used.
    pub title: String,
}

/// Parse `"123, 124"` into issue numbers.
///
/// # Errors
///
/// Returns [`PullError::InvalidIssueList`] if any token is not a number.
pub fn parse_issue_numbers(list: &str) -> Result<Vec<u64>, PullError> {
    list.split(',')
        .map(|token| token.trim().parse::<u64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| PullError::InvalidIssueList(list.to_string()))
}

/// Title for a pull request closing `issues`.
#[must_use]
pub fn pull_request_title(issues: &[Issue], custom: Option<&str>) -> String {
    if let Some(title) = custom {
        return title.to_string();
    }
    match issues {
        [issue] => format!("Fix: {}", issue.title),
        _ => format!("Fix multiple issues ({} issues)", issues.len()),
    }
}

/// Body linking `issues` with closing keywords and summarizing each one.
#[must_use]
pub fn pull_request_body(issues: &[Issue], custom: Option<&str>) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(text) = custom {
        parts.push(text.to_string());
        parts.push(String::new());
    }

    if let [issue] = issues {
        parts.push(format!("Fixes #{}", issue.number));
        parts.push(String::new());
        parts.push("## Issue Summary".to_string());
        parts.push(String::new());
        parts.push(description(issue).to_string());
    } else {
        parts.push("This PR addresses multiple issues:".to_string());
        parts.extend(issues.iter().map(|issue| format!("- Fixes #{}", issue.number)));
        parts.push(String::new());
        parts.push("## Issues Summary".to_string());
        for issue in issues {
            parts.push(String::new());
            parts.push(format!("### #{}: {}", issue.number, issue.title));
            parts.push(String::new());
            parts.push(truncate(description(issue)));
        }
    }

    parts.join("\n")
}

fn description(issue: &Issue) -> &str {
    if issue.body.is_empty() {
        "No description"
    } else {
        &issue.body
    }
}

fn truncate(text: &str) -> String {
    match text.char_indices().nth(SUMMARY_BODY_LIMIT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Fetch the linked issues and build title and body.
///
/// # Errors
///
/// Returns [`PullError::FetchIssue`] for the first issue that cannot be read.
pub fn prepare(
    tracker: &dyn IssueTracker,
    plan: &PullRequestPlan,
) -> Result<PreparedPullRequest, PullError> {
    let mut issues = Vec::with_capacity(plan.issues.len());
    for &number in &plan.issues {
        debug!(number, "fetching issue");
        let issue = tracker
            .view_issue(number, plan.repo.as_deref())
            .map_err(|e| PullError::FetchIssue { number, detail: e.to_string() })?;
        issues.push(issue);
    }
    let title = pull_request_title(&issues, plan.title.as_deref());
    let body = pull_request_body(&issues, plan.body.as_deref());
    Ok(PreparedPullRequest { issues, title, body })
}

/// Submit a prepared pull request.
///
/// # Errors
///
/// Returns [`PullError::Create`] if the tracker fails, or
/// [`PullError::Reference`] if its locator carries no number.
pub fn submit(
    tracker: &dyn IssueTracker,
    plan: &PullRequestPlan,
    prepared: &PreparedPullRequest,
) -> Result<CreatedPullRequest, PullError> {
    let draft = PullRequestDraft {
        title: &prepared.title,
        body: &prepared.body,
        base: &plan.base,
        draft: plan.draft,
        repo: plan.repo.as_deref(),
    };
    let url = tracker.create_pull_request(&draft).map_err(|e| PullError::Create(e.to_string()))?;
    let number = parse_reference(&url)?;
    Ok(CreatedPullRequest { number, url: url.trim().to_string(), title: prepared.title.clone() })
}
