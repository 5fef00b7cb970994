//! Service context bundling the port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::issues::GhIssueTracker;
use crate::adapters::live::shell::LiveShellExecutor;
use crate::adapters::recording::RecordingIssueTracker;
use crate::adapters::replaying::ReplayingIssueTracker;
use crate::cassette::format::Cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::config::Config;
use crate::ports::filesystem::FileSystem;
use crate::ports::issues::IssueTracker;

/// Bundles all port trait objects into a single context.
///
/// Constructors wire up different adapter implementations (live,
/// recording, replaying).
pub struct ServiceContext {
    /// Filesystem for reading inputs and writing summaries.
    pub fs: Box<dyn FileSystem>,
    /// Issue tracker used as the operation executor.
    pub issues: Box<dyn IssueTracker>,
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ServiceContext {
    /// Live context: real disk and `gh` through the system.
    #[must_use]
    pub fn live(config: &Config) -> Self {
        Self {
            fs: Box::new(LiveFileSystem),
            issues: Box::new(Self::live_tracker(config)),
            recorder: None,
        }
    }

    /// Live context whose tracker interactions are captured to `path`.
    ///
    /// Call [`ServiceContext::finish`] to write the cassette.
    #[must_use]
    pub fn recording(config: &Config, path: &Path) -> Self {
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(path, "ghbatch-session")));
        Self {
            fs: Box::new(LiveFileSystem),
            issues: Box::new(RecordingIssueTracker::new(
                Box::new(Self::live_tracker(config)),
                Arc::clone(&recorder),
            )),
            recorder: Some(recorder),
        }
    }

    /// Context whose tracker answers from a recorded cassette.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = Cassette::load(path)?;
        Ok(Self {
            fs: Box::new(LiveFileSystem),
            issues: Box::new(ReplayingIssueTracker::new(CassetteReplayer::new(&cassette))),
            recorder: None,
        })
    }

    /// Pick a context from `GHBATCH_REPLAY` / `GHBATCH_RECORD`, else live.
    ///
    /// # Errors
    ///
    /// Returns an error if a replay cassette cannot be loaded.
    pub fn from_env(config: &Config) -> Result<Self, String> {
        if let Some(path) = env_path("GHBATCH_REPLAY") {
            return Self::replaying(&path);
        }
        if let Some(path) = env_path("GHBATCH_RECORD") {
            return Ok(Self::recording(config, &path));
        }
        Ok(Self::live(config))
    }

    /// Write the cassette if this context is recording.
    ///
    /// Returns the cassette path when one was written.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be written.
    pub fn finish(self) -> Result<Option<PathBuf>, String> {
        let Some(recorder) = self.recorder else {
            return Ok(None);
        };
        // Release the tracker's handle on the recorder.
        drop(self.issues);
        let recorder = Arc::try_unwrap(recorder)
            .map_err(|_| "Recording tracker still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        recorder.finish().map(Some).map_err(|e| format!("Failed to write cassette: {e}"))
    }

    fn live_tracker(config: &Config) -> GhIssueTracker {
        GhIssueTracker::new(Box::new(LiveShellExecutor), config.gh_program.clone())
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name).filter(|v| !v.is_empty()).map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Interaction;
    use crate::ports::IssueDraft;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn replaying_context_serves_cassette() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batch.cassette.yaml");
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            interactions: vec![Interaction {
                seq: 0,
                port: "issues".into(),
                method: "create_issue".into(),
                input: json!({}),
                output: json!({"Ok": "https://github.com/o/r/issues/3"}),
            }],
        };
        std::fs::write(&path, serde_yaml::to_string(&cassette).unwrap()).unwrap();

        let ctx = ServiceContext::replaying(&path).unwrap();
        let url = ctx
            .issues
            .create_issue(&IssueDraft {
                title: "A",
                body: "b",
                labels: &[],
                assignees: &[],
                milestone: None,
                repo: None,
            })
            .unwrap();
        assert_eq!(url, "https://github.com/o/r/issues/3");
        assert_eq!(ctx.finish().unwrap(), None);
    }

    #[test]
    fn recording_context_writes_cassette_on_finish() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rec.cassette.yaml");
        let config = Config { gh_program: "ghbatch-missing-gh".into(), ..Config::default() };

        let ctx = ServiceContext::recording(&config, &path);
        assert!(ctx.issues.view_issue(1, None).is_err());
        assert_eq!(ctx.finish().unwrap(), Some(path.clone()));

        let cassette = Cassette::load(&path).unwrap();
        assert_eq!(cassette.interactions.len(), 1);
        assert_eq!(cassette.interactions[0].method, "view_issue");
    }

    #[test]
    fn missing_replay_cassette_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ServiceContext::replaying(&dir.path().join("none.yaml")).is_err());
    }
}
