//! Session setup for CLI commands.
//!
//! Sessions live in a [`FileStore`] under the data directory, one file per
//! entry, so a refresh during one command is visible to the next.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use directories::ProjectDirs;

use taskmaster_client::{ClientConfig, DEFAULT_STORAGE_PREFIX, SessionManager};
use taskmaster_core::ApiUrl;
use taskmaster_store::FileStore;

use crate::cli::ApiOptions;

pub const NO_SESSION: &str = "No active session. Run 'taskmaster auth login' first.";

/// An opened (not necessarily signed-in) session and its backing store.
pub struct CliSession {
    pub manager: SessionManager,
    pub store: FileStore,
}

impl CliSession {
    /// When the stored session was last written, if any.
    pub fn saved_at(&self) -> Option<String> {
        let key = format!("{}token", DEFAULT_STORAGE_PREFIX);
        match self.store.entry(&key) {
            Ok(entry) => entry.map(|e| e.updated_at.to_rfc3339()),
            Err(e) => {
                tracing::debug!(error = %e, "Could not read session entry");
                None
            }
        }
    }
}

/// Resolve the data directory.
fn data_dir(options: &ApiOptions) -> Result<PathBuf> {
    if let Some(dir) = &options.data_dir {
        return Ok(dir.clone());
    }

    let dirs =
        ProjectDirs::from("", "", "taskmaster").context("Could not determine data directory")?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Build a session manager over the on-disk store and restore any session.
pub async fn open(options: &ApiOptions) -> Result<CliSession> {
    let api_url = ApiUrl::new(&options.api_url).context("Invalid API URL")?;
    let config =
        ClientConfig::new(api_url).with_request_timeout(Duration::from_secs(options.timeout_secs));

    let store = FileStore::new(data_dir(options)?);
    tracing::debug!(root = %store.root().display(), "Opening session store");

    let manager = SessionManager::new(config, Arc::new(store.clone()))
        .context("Failed to create API client")?;
    manager.restore().await;

    Ok(CliSession { manager, store })
}

/// Like [`open`], but fail unless a session was restored.
pub async fn require(options: &ApiOptions) -> Result<CliSession> {
    let session = open(options).await?;
    if !session.manager.is_authenticated() {
        bail!(NO_SESSION);
    }
    Ok(session)
}
