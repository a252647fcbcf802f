//! Session persistence.
//!
//! A [`SessionStore`] reads and writes the whole session as a single
//! JSON document under a fixed storage key. Loading is deliberately
//! forgiving: a missing file, unparsable JSON, or a session that fails
//! invariant validation all read as "no saved session", so the caller
//! falls back to a fresh default instead of surfacing an error. Saving
//! writes to a sibling temp file and renames it into place, so a crash
//! mid-write cannot corrupt the previous blob.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::session::Session;

/// Fixed storage key. Bump the version suffix when the schema changes
/// incompatibly.
pub const STORAGE_KEY: &str = "commander-life-state-v1";

/// File-backed store for a [`Session`].
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a store backed by an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store using the default file name under `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", STORAGE_KEY)),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved session, if there is a usable one.
    ///
    /// Returns `None` when the file is missing, unreadable, fails to
    /// parse, or parses into a session that violates an invariant.
    /// Failures are logged, never propagated.
    pub fn load(&self) -> Option<Session> {
        let text = fs::read_to_string(&self.path).ok()?;
        let session: Session = match serde_json::from_str(&text) {
            Ok(session) => session,
            Err(err) => {
                log::warn!(
                    "discarding unreadable session state at {}: {}",
                    self.path.display(),
                    err
                );
                return None;
            }
        };
        if !session.is_valid() {
            log::warn!(
                "discarding session state at {} that fails validation",
                self.path.display()
            );
            return None;
        }
        Some(session)
    }

    /// Write the whole session as one JSON document.
    ///
    /// The document is written to a `.tmp` sibling, synced, and renamed
    /// over the previous blob.
    pub fn save(&self, session: &Session) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(session)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.path.with_extension("tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }
}

/// Errors from the save path.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Serialize(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "state file write failed: {}", err),
            Self::Serialize(err) => write!(f, "state serialization failed: {}", err),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err)
    }
}
