//! Issue tracker port: the operation executor for the batch engine.

use serde::{Deserialize, Serialize};

use crate::error::PortError;

/// An issue fetched from the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// The issue number.
    pub number: u64,
    /// The issue title.
    pub title: String,
    /// The issue body; empty when the issue has no description.
    #[serde(default)]
    pub body: String,
}

/// Fields of an issue to create.
#[derive(Debug, Clone, Serialize)]
pub struct IssueDraft<'a> {
    /// Issue title.
    pub title: &'a str,
    /// Issue body.
    pub body: &'a str,
    /// Labels to apply.
    pub labels: &'a [String],
    /// Users to assign.
    pub assignees: &'a [String],
    /// Milestone title.
    pub milestone: Option<&'a str>,
    /// Target `owner/name`; `None` uses the tracker's default repository.
    pub repo: Option<&'a str>,
}

/// Fields of a pull request to open.
#[derive(Debug, Clone, Serialize)]
pub struct PullRequestDraft<'a> {
    /// Pull request title.
    pub title: &'a str,
    /// Pull request body.
    pub body: &'a str,
    /// Branch to merge into.
    pub base: &'a str,
    /// Open as a draft.
    pub draft: bool,
    /// Target `owner/name`; `None` uses the tracker's default repository.
    pub repo: Option<&'a str>,
}

/// Creates and reads records in a remote issue tracker.
///
/// Abstracting the tracker keeps the batch engine independent of the
/// transport and lets tests substitute fakes or recorded cassettes.
pub trait IssueTracker: Send + Sync {
    /// Creates an issue and returns its locator (a URL whose final path
    /// segment is the issue number).
    ///
    /// # Errors
    ///
    /// Returns the tracker's diagnostic text if the issue cannot be created.
    fn create_issue(&self, issue: &IssueDraft<'_>) -> Result<String, PortError>;

    /// Fetches an existing issue.
    ///
    /// # Errors
    ///
    /// Returns an error if the issue cannot be found or read.
    fn view_issue(&self, number: u64, repo: Option<&str>) -> Result<Issue, PortError>;

    /// Opens a pull request and returns its locator.
    ///
    /// # Errors
    ///
    /// Returns the tracker's diagnostic text if the pull request cannot be created.
    fn create_pull_request(&self, pr: &PullRequestDraft<'_>) -> Result<String, PortError>;
}
