//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the batch engine and an
//! external system (filesystem, shell, issue tracker). Implementations live
//! in `src/adapters/`.

pub mod filesystem;
pub mod issues;
pub mod shell;

pub use filesystem::FileSystem;
pub use issues::{Issue, IssueDraft, IssueTracker, PullRequestDraft};
pub use shell::{ShellExecutor, ShellOutput};
