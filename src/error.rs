//! Fatal error types.
//!
//! Per-call failures against the identity service are [`ServiceError`]s and
//! never abort a run. Everything here stops the command.
//!
//! [`ServiceError`]: crate::ports::identity_service::ServiceError

use thiserror::Error;

/// Errors that abort a command.
#[derive(Debug, Error)]
pub enum ReorgError {
    /// One or more required settings are absent or empty.
    #[error("missing required configuration: {}", .0.join(", "))]
    MissingConfig(Vec<&'static str>),
    /// A setting is present but unusable (unreadable trust anchor, bad URL).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The token exchange was rejected or could not be completed.
    #[error("authentication failed: {0}")]
    Auth(String),
    /// The reorg input file could not be read.
    #[error("input error: {0}")]
    Input(String),
    /// The identity snapshot could not be read or written.
    #[error("snapshot error: {0}")]
    Snapshot(String),
    /// A report or the workbook could not be written.
    #[error("report error: {0}")]
    Report(String),
    /// A cassette could not be loaded or saved.
    #[error("cassette error: {0}")]
    Cassette(String),
}

/// Convenience alias for results carrying a [`ReorgError`].
pub type ReorgResult<T> = Result<T, ReorgError>;
