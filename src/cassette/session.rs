//! Recording session owning the identity-service cassette recorder.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;
use crate::error::{ReorgError, ReorgResult};

/// File name of the identity-service cassette inside a session directory.
pub const IDENTITY_CASSETTE: &str = "identity.cassette.yaml";

/// A recording in progress.
///
/// The recorder is shared with the recording adapter; all cassettes of the
/// session are stored in a timestamped directory.
pub struct RecordingSession {
    /// Recorder for identity-service interactions.
    pub identity: Arc<Mutex<CassetteRecorder>>,
    /// Output directory containing all cassette files.
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Create a new recording session in `<root>/<timestamp>/`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The cassette directory already exists
    /// - The directory cannot be created
    pub fn new(root: &Path, base_url: &str) -> ReorgResult<Self> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let output_dir = root.join(&timestamp);

        if output_dir.exists() {
            return Err(ReorgError::Cassette(format!(
                "Cassette directory already exists: {}",
                output_dir.display()
            )));
        }
        std::fs::create_dir_all(&output_dir).map_err(|e| {
            ReorgError::Cassette(format!("Failed to create cassette directory: {e}"))
        })?;

        let recorder = CassetteRecorder::new(
            output_dir.join(IDENTITY_CASSETTE),
            format!("{timestamp}-identity"),
            base_url,
        );
        Ok(Self { identity: Arc::new(Mutex::new(recorder)), output_dir })
    }

    /// Directory the cassettes are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Finish the recorder and write the cassette file to disk.
    ///
    /// The recording adapter must have been dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if the adapter still holds the recorder or the
    /// cassette file cannot be written.
    pub fn finish(self) -> ReorgResult<PathBuf> {
        let recorder = Arc::try_unwrap(self.identity)
            .map_err(|_| {
                ReorgError::Cassette("Recording adapter for identity still has references".into())
            })?
            .into_inner()
            .map_err(|e| ReorgError::Cassette(format!("Recorder lock poisoned: {e}")))?;
        recorder
            .finish()
            .map_err(|e| ReorgError::Cassette(format!("Failed to write identity cassette: {e}")))?;
        Ok(self.output_dir)
    }
}
