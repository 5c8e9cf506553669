//! Durable session persistence.
//!
//! The session slice is serialized as a versioned JSON blob so a process
//! restart restores authentication without a fresh login. Consumers pick the
//! backing store: [`FileStorage`] for real deployments, [`MemoryStorage`] for
//! tests and ephemeral sessions, or their own [`SessionStorage`] impl.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::models::User;

/// Format version of the persisted blob. Blobs written by a different
/// version are discarded on load and the client starts signed out.
pub const STORAGE_VERSION: u32 = 1;

/// The serialized session blob: `{state, version}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub state: PersistedState,
    pub version: u32,
}

/// The session slice that survives restarts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

/// Errors from the persistence layer.
///
/// Persistence failures never fail an API operation; the session logs them
/// and carries on in memory.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Consumer-provided session persistence.
///
/// Object-safe and synchronous: implementations are expected to be fast
/// local writes (a file, a keychain entry, an in-memory slot), not network
/// calls.
pub trait SessionStorage: Send + Sync {
    /// Load the persisted blob, `None` when nothing has been saved.
    fn load(&self) -> Result<Option<PersistedSession>, StorageError>;

    /// Persist the blob, replacing any previous one.
    fn save(&self, session: &PersistedSession) -> Result<(), StorageError>;

    /// Remove the persisted blob (sign-out).
    fn clear(&self) -> Result<(), StorageError>;
}

/// In-memory storage. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<parking_lot::Mutex<Option<PersistedSession>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> Result<Option<PersistedSession>, StorageError> {
        Ok(self.slot.lock().clone())
    }

    fn save(&self, session: &PersistedSession) -> Result<(), StorageError> {
        *self.slot.lock() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.slot.lock() = None;
        Ok(())
    }
}

/// JSON-file storage.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write leaves the previous blob intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create file storage from the environment.
    ///
    /// Uses `CAMPUSWATCH_SESSION_FILE` when set, otherwise
    /// `campuswatch-session.json` in the working directory.
    #[must_use]
    pub fn from_env() -> Self {
        let path = std::env::var("CAMPUSWATCH_SESSION_FILE")
            .unwrap_or_else(|_| "campuswatch-session.json".to_string());
        Self::new(path)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileStorage {
    fn load(&self) -> Result<Option<PersistedSession>, StorageError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let session: PersistedSession = serde_json::from_str(&text)?;
        Ok(Some(session))
    }

    fn save(&self, session: &PersistedSession) -> Result<(), StorageError> {
        let text = serde_json::to_string(session)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, text)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
