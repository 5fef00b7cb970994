//! Replaying adapters that serve recorded interactions.

pub mod issues;

use std::sync::Mutex;

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;
use crate::error::PortError;

pub use issues::ReplayingIssueTracker;

/// Take the next recorded output for `port::method`.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> Result<serde_json::Value, PortError> {
    let mut guard = replayer.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    Ok(guard.next_interaction(port, method)?.output)
}

/// Decode an output written by `recording::record_result`.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: serde_json::Value,
) -> Result<T, PortError> {
    if let Some(err) = output.get("Err") {
        return Err(err.as_str().unwrap_or("unknown error").to_string().into());
    }
    let value = output.get("Ok").cloned().ok_or("recorded output has neither Ok nor Err")?;
    Ok(serde_json::from_value(value)?)
}
