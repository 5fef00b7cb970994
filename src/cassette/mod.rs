//! Cassette format for recording and replaying tracker interactions.
//!
//! Set `GHBATCH_RECORD=<file>` to capture a live session, and
//! `GHBATCH_REPLAY=<file>` to run against a captured one.

pub mod format;
pub mod recorder;
pub mod replayer;
