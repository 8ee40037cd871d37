//! Session persistence
//!
//! Stores the [`PersistedSession`] slice as JSON, by default under the
//! platform data directory (`<data dir>/yapyap/session.json`).

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::client::error::ClientError;
use crate::client::state::PersistedSession;
use crate::shared::config::AppConfig;

#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Session file named by `config`, falling back to [`Self::default_path`]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.session_path.clone().unwrap_or_else(Self::default_path))
    }

    /// Session file in the platform data directory, or the temp dir if there is none
    pub fn default_path() -> PathBuf {
        let mut path = dirs::data_dir().unwrap_or_else(std::env::temp_dir);
        path.push("yapyap");
        path.push("session.json");
        path
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored session; a missing file yields `None`
    pub fn load(&self) -> Result<Option<PersistedSession>, ClientError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    pub fn save(&self, session: &PersistedSession) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(session)?)?;
        tracing::debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    /// Remove the stored session; a missing file is fine
    pub fn clear(&self) -> Result<(), ClientError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for SessionFile {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}
