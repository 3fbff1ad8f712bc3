//! Replaying adapters that serve recorded interactions.

pub mod identity_service;

pub use identity_service::ReplayingIdentityService;

use std::sync::Mutex;

use serde::de::DeserializeOwned;

use super::{argument_key, call_input};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::ServiceError;

/// Take the next recorded output for `method`, checking the call argument.
///
/// # Errors
///
/// Returns [`ServiceError::Replayed`] if the cassette is exhausted for
/// `method` or the argument differs from the recording.
///
/// # Panics
///
/// Panics if the lock is poisoned.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    method: &str,
    argument: &str,
) -> Result<serde_json::Value, ServiceError> {
    let input = call_input(argument_key(method), argument);
    let mut guard = replayer.lock().expect("replayer lock poisoned");
    guard
        .next_interaction(method, &input)
        .map(|interaction| interaction.output.clone())
        .map_err(ServiceError::Replayed)
}

/// Decode a recorded `{"Ok": v}` / `{"Err": msg}` output.
///
/// Mirror of `recording::record_result`.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: serde_json::Value,
) -> Result<T, ServiceError> {
    match output {
        serde_json::Value::Object(mut map) => {
            if let Some(err) = map.remove("Err") {
                let message = err.as_str().map_or_else(|| err.to_string(), str::to_string);
                return Err(ServiceError::Replayed(message));
            }
            let ok = map.remove("Ok").ok_or_else(|| {
                ServiceError::Decode("recorded output has neither Ok nor Err".into())
            })?;
            serde_json::from_value(ok).map_err(|e| ServiceError::Decode(e.to_string()))
        }
        other => Err(ServiceError::Decode(format!("recorded output is not an object: {other}"))),
    }
}
