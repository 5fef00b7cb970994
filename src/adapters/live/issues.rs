//! Live adapter for the `IssueTracker` port backed by the `gh` CLI.

use tracing::debug;

use crate::error::PortError;
use crate::ports::shell::{ShellExecutor, ShellOutput};
use crate::ports::{Issue, IssueDraft, IssueTracker, PullRequestDraft};

/// Issue tracker that shells out to `gh` for every operation.
pub struct GhIssueTracker {
    shell: Box<dyn ShellExecutor>,
    program: String,
}

impl GhIssueTracker {
    /// Creates a tracker that runs `program` (normally `gh`) through `shell`.
    pub fn new(shell: Box<dyn ShellExecutor>, program: impl Into<String>) -> Self {
        Self { shell, program: program.into() }
    }

    fn invoke(&self, args: &[String]) -> Result<String, PortError> {
        debug!(program = %self.program, subcommand = ?args.get(..2), "invoking issue tracker");
        let output = self.shell.run(&self.program, args)?;
        if output.success() {
            Ok(output.stdout.trim().to_string())
        } else {
            Err(self.diagnostic(&output).into())
        }
    }

    fn diagnostic(&self, output: &ShellOutput) -> String {
        if output.stderr.trim().is_empty() {
            format!("{} exited with status {}", self.program, output.exit_code)
        } else {
            output.stderr.clone()
        }
    }
}

fn push_repo(args: &mut Vec<String>, repo: Option<&str>) {
    if let Some(repo) = repo {
        args.extend(["--repo".to_string(), repo.to_string()]);
    }
}

/// Arguments for `gh issue create`.
fn create_issue_args(issue: &IssueDraft<'_>) -> Vec<String> {
    let mut args: Vec<String> = ["issue", "create", "--title", issue.title, "--body", issue.body]
        .into_iter()
        .map(str::to_string)
        .collect();
    push_repo(&mut args, issue.repo);
    for label in issue.labels {
        args.extend(["--label".to_string(), label.clone()]);
    }
    for assignee in issue.assignees {
        args.extend(["--assignee".to_string(), assignee.clone()]);
    }
    if let Some(milestone) = issue.milestone.filter(|m| !m.is_empty()) {
        args.extend(["--milestone".to_string(), milestone.to_string()]);
    }
    args
}

/// Arguments for `gh pr create`.
fn create_pull_request_args(pr: &PullRequestDraft<'_>) -> Vec<String> {
    let mut args: Vec<String> =
        ["pr", "create", "--title", pr.title, "--body", pr.body, "--base", pr.base]
            .into_iter()
            .map(str::to_string)
            .collect();
    push_repo(&mut args, pr.repo);
    if pr.draft {
        args.push("--draft".to_string());
    }
    args
}

impl IssueTracker for GhIssueTracker {
    fn create_issue(&self, issue: &IssueDraft<'_>) -> Result<String, PortError> {
        self.invoke(&create_issue_args(issue))
    }

    fn view_issue(&self, number: u64, repo: Option<&str>) -> Result<Issue, PortError> {
        let mut args: Vec<String> = vec![
            "issue".into(),
            "view".into(),
            number.to_string(),
            "--json".into(),
            "number,title,body".into(),
        ];
        push_repo(&mut args, repo);
        let json = self.invoke(&args)?;
        serde_json::from_str(&json)
            .map_err(|e| format!("unexpected response for issue #{number}: {e}").into())
    }

    fn create_pull_request(&self, pr: &PullRequestDraft<'_>) -> Result<String, PortError> {
        self.invoke(&create_pull_request_args(pr))
    }
}
