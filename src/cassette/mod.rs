//! Cassettes: recorded identity-service sessions.
//!
//! A cassette is a YAML file holding every call a run made against the
//! identity service and what came back. Replaying one reproduces the run
//! without network access or credentials.

pub mod format;
pub mod recorder;
pub mod replayer;
pub mod session;
