//! Replaying adapter for the `IssueTracker` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::error::PortError;
use crate::ports::{Issue, IssueDraft, IssueTracker, PullRequestDraft};

/// Serves recorded issue tracker results from a cassette.
pub struct ReplayingIssueTracker {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingIssueTracker {
    /// Create a replaying issue tracker backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl IssueTracker for ReplayingIssueTracker {
    fn create_issue(&self, _issue: &IssueDraft<'_>) -> Result<String, PortError> {
        replay_result(next_output(&self.replayer, "issues", "create_issue")?)
    }

    fn view_issue(&self, _number: u64, _repo: Option<&str>) -> Result<Issue, PortError> {
        replay_result(next_output(&self.replayer, "issues", "view_issue")?)
    }

    fn create_pull_request(&self, _pr: &PullRequestDraft<'_>) -> Result<String, PortError> {
        replay_result(next_output(&self.replayer, "issues", "create_pull_request")?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    fn tracker(interactions: Vec<(&str, serde_json::Value)>) -> ReplayingIssueTracker {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            interactions: interactions
                .into_iter()
                .enumerate()
                .map(|(seq, (method, output))| Interaction {
                    seq: seq as u64,
                    port: "issues".into(),
                    method: method.into(),
                    input: json!({}),
                    output,
                })
                .collect(),
        };
        ReplayingIssueTracker::new(CassetteReplayer::new(&cassette))
    }

    fn draft() -> IssueDraft<'static> {
        IssueDraft {
            title: "A",
            body: "b",
            labels: &[],
            assignees: &[],
            milestone: None,
            repo: None,
        }
    }

    #[test]
    fn replays_ok_and_err() {
        let tracker = tracker(vec![
            ("create_issue", json!({"Ok": "https://github.com/o/r/issues/42"})),
            ("create_issue", json!({"Err": "rate limited"})),
        ]);
        assert_eq!(tracker.create_issue(&draft()).unwrap(), "https://github.com/o/r/issues/42");
        assert_eq!(tracker.create_issue(&draft()).unwrap_err().to_string(), "rate limited");
    }

    #[test]
    fn replays_issue_view() {
        let reply = json!({"Ok": {"number": 7, "title": "Crash", "body": ""}});
        let tracker = tracker(vec![("view_issue", reply)]);
        let issue = tracker.view_issue(7, None).unwrap();
        assert_eq!(issue.title, "Crash");
    }

    #[test]
    fn exhausted_cassette_is_an_error() {
        let tracker = tracker(vec![]);
        let err = tracker.create_issue(&draft()).unwrap_err();
        assert!(err.to_string().contains("Cassette exhausted"));
    }
}
