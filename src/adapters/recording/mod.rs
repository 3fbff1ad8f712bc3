//! Recording adapters that capture interactions to cassettes.

pub mod identity_service;

pub use identity_service::RecordingIdentityService;

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::{argument_key, call_input};
use crate::cassette::recorder::CassetteRecorder;

/// Record a `Result<T, E>` interaction using the Ok/Err JSON convention.
///
/// Mirror of `replaying::replay_result`.
pub(crate) fn record_result<T, E>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    method: &str,
    argument: &str,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
{
    let input = call_input(argument_key(method), argument);
    let mut guard = recorder.lock().expect("recorder lock poisoned");
    guard.record_result(method, input, result);
}
