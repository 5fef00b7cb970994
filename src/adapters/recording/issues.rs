//! Recording adapter for the `IssueTracker` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::error::PortError;
use crate::ports::{Issue, IssueDraft, IssueTracker, PullRequestDraft};

/// Records issue tracker interactions while delegating to an inner implementation.
pub struct RecordingIssueTracker {
    inner: Box<dyn IssueTracker>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingIssueTracker {
    /// Creates a new recording issue tracker wrapping the given implementation.
    pub fn new(inner: Box<dyn IssueTracker>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct ViewIssueInput<'a> {
    number: u64,
    repo: Option<&'a str>,
}

impl IssueTracker for RecordingIssueTracker {
    fn create_issue(&self, issue: &IssueDraft<'_>) -> Result<String, PortError> {
        let result = self.inner.create_issue(issue);
        record_result(&self.recorder, "issues", "create_issue", issue, &result);
        result
    }

    fn view_issue(&self, number: u64, repo: Option<&str>) -> Result<Issue, PortError> {
        let result = self.inner.view_issue(number, repo);
        let input = ViewIssueInput { number, repo };
        record_result(&self.recorder, "issues", "view_issue", &input, &result);
        result
    }

    fn create_pull_request(&self, pr: &PullRequestDraft<'_>) -> Result<String, PortError> {
        let result = self.inner.create_pull_request(pr);
        record_result(&self.recorder, "issues", "create_pull_request", pr, &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct FixedTracker;

    impl IssueTracker for FixedTracker {
        fn create_issue(&self, issue: &IssueDraft<'_>) -> Result<String, PortError> {
            if issue.title == "bad" {
                Err("validation failed: title".into())
            } else {
                Ok("https://github.com/o/r/issues/5".to_string())
            }
        }

        fn view_issue(&self, number: u64, _repo: Option<&str>) -> Result<Issue, PortError> {
            Ok(Issue { number, title: "Crash".into(), body: String::new() })
        }

        fn create_pull_request(&self, _pr: &PullRequestDraft<'_>) -> Result<String, PortError> {
            Ok("https://github.com/o/r/pull/6".to_string())
        }
    }

    fn draft(title: &str) -> IssueDraft<'_> {
        IssueDraft { title, body: "b", labels: &[], assignees: &[], milestone: None, repo: None }
    }

    #[test]
    fn records_successes_and_failures() {
        let dir = tempfile::tempdir().unwrap();
        let cassette_path = dir.path().join("issues.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&cassette_path, "test")));

        // Scope the adapter so it's dropped before we try to unwrap
        {
            let tracker = RecordingIssueTracker::new(Box::new(FixedTracker), Arc::clone(&recorder));
            assert!(tracker.create_issue(&draft("good")).is_ok());
            assert!(tracker.create_issue(&draft("bad")).is_err());
            assert!(tracker.view_issue(3, Some("o/r")).is_ok());
        }

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        recorder.finish().unwrap();

        let cassette = crate::cassette::format::Cassette::load(&cassette_path).unwrap();
        let outputs: Vec<_> = cassette.interactions.iter().map(|i| i.output.clone()).collect();
        assert_eq!(
            outputs,
            vec![
                json!({"Ok": "https://github.com/o/r/issues/5"}),
                json!({"Err": "validation failed: title"}),
                json!({"Ok": {"number": 3, "title": "Crash", "body": ""}}),
            ]
        );
        assert_eq!(cassette.interactions[0].input["title"], json!("good"));
        assert_eq!(cassette.interactions[2].input, json!({"number": 3, "repo": "o/r"}));
    }
}
