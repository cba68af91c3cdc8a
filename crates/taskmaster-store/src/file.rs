//! Filesystem-backed key-value store.
//!
//! Layout under the root directory:
//!
//! ```text
//! <root>/
//!   .store.lock          writer lock (fs2 exclusive)
//!   <key>.json           {"value": "...", "updated_at": "<rfc3339>"}
//! ```
//!
//! Writes go to a temp file and are renamed into place, so a reader never
//! observes a half-written entry.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind as IoErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use taskmaster_core::error::{Error, InvalidInputError, StorageError};
use taskmaster_core::traits::KeyValueStore;
use taskmaster_core::Result;

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

const LOCK_FILE: &str = ".store.lock";

fn map_io(key: &str, err: std::io::Error) -> Error {
    Error::Storage(StorageError::Io {
        key: key.to_string(),
        message: err.to_string(),
    })
}

/// A stored value with its last write time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEntry {
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

/// Key-value store keeping one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a new file store at the given root directory.
    ///
    /// The directory is created lazily on first write.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read an entry together with its write time.
    pub fn entry(&self, key: &str) -> Result<Option<StoredEntry>> {
        let path = self.entry_path(key)?;

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(map_io(key, e)),
        };

        let entry = serde_json::from_str(&content).map_err(|e| {
            Error::Storage(StorageError::Corrupt {
                key: key.to_string(),
                message: e.to_string(),
            })
        })?;

        Ok(Some(entry))
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf> {
        Self::validate_key(key)?;
        Ok(self.root.join(format!("{}.json", key)))
    }

    /// Keys become file names, so only a conservative character set is allowed.
    fn validate_key(key: &str) -> Result<()> {
        let reason = if key.is_empty() {
            Some("must not be empty")
        } else if key.starts_with('.') {
            Some("must not start with '.'")
        } else if !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        {
            Some("may only contain ASCII letters, digits, '_', '-' and '.'")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(InvalidInputError::StorageKey {
                value: key.to_string(),
                reason: reason.to_string(),
            }
            .into()),
            None => Ok(()),
        }
    }

    /// Run `f` while holding the exclusive writer lock.
    fn with_write_lock<T>(&self, key: &str, f: impl FnOnce() -> Result<T>) -> Result<T> {
        fs::create_dir_all(&self.root).map_err(|e| map_io(key, e))?;

        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.root.join(LOCK_FILE))
            .map_err(|e| map_io(key, e))?;

        lock_file.lock_exclusive().map_err(|e| map_io(key, e))?;
        let result = f();
        lock_file.unlock().map_err(|e| map_io(key, e))?;

        result
    }

    fn write_entry(&self, key: &str, path: &Path, entry: &StoredEntry) -> Result<()> {
        let content = serde_json::to_string_pretty(entry).map_err(|e| {
            Error::Storage(StorageError::Corrupt {
                key: key.to_string(),
                message: e.to_string(),
            })
        })?;

        let temp_path = path.with_extension("json.tmp");
        // A temp file left by a crash keeps its old mode, so start fresh.
        match fs::remove_file(&temp_path) {
            Ok(()) => {}
            Err(e) if e.kind() == IoErrorKind::NotFound => {}
            Err(e) => return Err(map_io(key, e)),
        }

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        // Owner-only from creation (Unix only)
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(&temp_path).map_err(|e| map_io(key, e))?;
        file.write_all(content.as_bytes())
            .map_err(|e| map_io(key, e))?;
        file.sync_data().map_err(|e| map_io(key, e))?;

        fs::rename(&temp_path, path).map_err(|e| map_io(key, e))?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entry = self.entry(key)?;
        trace!(found = entry.is_some(), "Read entry");
        Ok(entry.map(|e| e.value))
    }

    #[instrument(skip(self, value), fields(root = %self.root.display()))]
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.entry_path(key)?;
        let entry = StoredEntry {
            value: value.to_string(),
            updated_at: Utc::now(),
        };

        self.with_write_lock(key, || self.write_entry(key, &path, &entry))?;
        debug!("Wrote entry");
        Ok(())
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.entry_path(key)?;

        self.with_write_lock(key, || match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(()),
            Err(e) => Err(map_io(key, e)),
        })?;

        debug!("Removed entry");
        Ok(())
    }
}
