//! Records interactions into a cassette file.

use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;

use super::format::{Cassette, Interaction};

/// Records identity-service calls and writes them as a YAML cassette file.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    name: String,
    base_url: String,
    interactions: Vec<Interaction>,
    next_seq: u64,
}

impl CassetteRecorder {
    /// Create a new recorder that will write to the given path.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            base_url: base_url.into(),
            interactions: Vec::new(),
            next_seq: 0,
        }
    }

    /// Record an interaction. The `seq` field is assigned automatically.
    pub fn record(
        &mut self,
        method: impl Into<String>,
        input: serde_json::Value,
        output: serde_json::Value,
    ) {
        self.interactions.push(Interaction {
            seq: self.next_seq,
            method: method.into(),
            input,
            output,
        });
        self.next_seq += 1;
    }

    /// Record the outcome of a call using the Ok/Err JSON convention.
    ///
    /// - `Ok(v)` is stored as `{"Ok": v}`
    /// - `Err(e)` is stored as `{"Err": e.to_string()}`
    ///
    /// A value that cannot be represented as JSON is stored as an `Err`.
    pub fn record_result<T, E>(
        &mut self,
        method: &str,
        input: serde_json::Value,
        result: &Result<T, E>,
    ) where
        T: Serialize,
        E: std::fmt::Display,
    {
        let output = match result {
            Ok(v) => match serde_json::to_value(v) {
                Ok(inner) => serde_json::json!({ "Ok": inner }),
                Err(e) => serde_json::json!({ "Err": format!("unrecordable value: {e}") }),
            },
            Err(e) => serde_json::json!({ "Err": e.to_string() }),
        };
        self.record(method, input, output);
    }

    /// Number of interactions recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }

    /// Finish recording and write the cassette YAML file to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, std::io::Error> {
        let cassette = Cassette {
            name: self.name,
            recorded_at: Utc::now(),
            base_url: self.base_url,
            interactions: self.interactions,
        };
        let yaml = serde_yaml::to_string(&cassette).map_err(std::io::Error::other)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, yaml)?;
        Ok(self.path)
    }
}
