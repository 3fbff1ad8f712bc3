//! Service settings loaded from the environment.
//!
//! A `.env` file in the working directory is loaded first and overrides
//! variables already set in the process environment.

use std::path::PathBuf;

use crate::error::{ReorgError, ReorgResult};

/// Client id used for the client-credentials exchange.
pub const CLIENT_ID: &str = "CLIENT_ID";
/// Client secret used for the client-credentials exchange.
pub const CLIENT_SECRET: &str = "CLIENT_SECRET";
/// Path to the PEM trust anchor for the service's TLS certificate.
pub const CERT_PATH: &str = "CERT_PATH";
/// Base URL of the identity service.
pub const BASE_URL: &str = "BASE_URL";

/// Connection settings for the identity service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
    /// PEM file holding the trust anchor.
    pub cert_path: PathBuf,
    /// Base URL, always ending in `/`.
    pub base_url: String,
}

impl Settings {
    /// Loads `.env` (if present) and reads settings from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ReorgError::InvalidConfig`] if a `.env` file exists but
    /// cannot be read or parsed, and [`ReorgError::MissingConfig`] naming
    /// every absent or empty variable.
    pub fn from_env() -> ReorgResult<Self> {
        check_dotenv(dotenvy::dotenv_override())?;
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ReorgError::MissingConfig`] naming every absent or empty key.
    pub fn from_lookup<F>(lookup: F) -> ReorgResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut read = |key: &'static str| {
            let value = lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
            if value.is_none() {
                missing.push(key);
            }
            value.unwrap_or_default()
        };

        let client_id = read(CLIENT_ID);
        let client_secret = read(CLIENT_SECRET);
        let cert_path = read(CERT_PATH);
        let base_url = read(BASE_URL);

        if !missing.is_empty() {
            return Err(ReorgError::MissingConfig(missing));
        }

        Ok(Self {
            client_id,
            client_secret,
            cert_path: PathBuf::from(cert_path),
            base_url: normalize_base_url(&base_url),
        })
    }
}

/// Accepts a loaded or absent `.env` file and rejects any other outcome.
fn check_dotenv<T>(loaded: dotenvy::Result<T>) -> ReorgResult<()> {
    match loaded {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(ReorgError::InvalidConfig(format!("Failed to load .env: {e}"))),
    }
}

/// Ensures the base URL ends with exactly one `/` so paths can be appended.
#[must_use]
pub fn normalize_base_url(base_url: &str) -> String {
    format!("{}/", base_url.trim_end_matches('/'))
}
