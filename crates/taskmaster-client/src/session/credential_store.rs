//! Durable persistence of the credential set.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use taskmaster_core::error::{Error, StorageError};
use taskmaster_core::{AccessToken, Credentials, KeyValueStore, RefreshToken, Result, UserProfile};

const TOKEN_KEY: &str = "token";
const REFRESH_TOKEN_KEY: &str = "refresh_token";
const USER_KEY: &str = "user";

/// Reads and writes the three session entries under a key prefix.
///
/// Writes are independent; a crash between them can leave a partial set,
/// which [`load`](Self::load) treats as no session.
#[derive(Clone)]
pub struct CredentialStore {
    store: Arc<dyn KeyValueStore>,
    prefix: String,
}

impl CredentialStore {
    pub fn new(store: Arc<dyn KeyValueStore>, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    fn key(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    #[instrument(skip_all, fields(user = %credentials.user.id))]
    pub async fn save(&self, credentials: &Credentials) -> Result<()> {
        let user = serde_json::to_string(&credentials.user).map_err(|e| {
            Error::Storage(StorageError::Corrupt {
                key: self.key(USER_KEY),
                message: e.to_string(),
            })
        })?;

        self.store
            .set(&self.key(TOKEN_KEY), credentials.access_token.as_str())
            .await?;
        self.store
            .set(&self.key(REFRESH_TOKEN_KEY), credentials.refresh_token.as_str())
            .await?;
        self.store.set(&self.key(USER_KEY), &user).await?;

        debug!("Credentials saved");
        Ok(())
    }

    /// Load a complete credential set. Never fails: missing, unreadable or
    /// unparseable entries all mean "no session".
    #[instrument(skip_all)]
    pub async fn load(&self) -> Option<Credentials> {
        let token = self.read(TOKEN_KEY).await?;
        let refresh_token = self.read(REFRESH_TOKEN_KEY).await?;
        let user = self.read(USER_KEY).await?;

        let user: UserProfile = match serde_json::from_str(&user) {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "Stored user profile is unreadable");
                return None;
            }
        };

        debug!(user = %user.id, "Credentials loaded");
        Some(Credentials::new(
            AccessToken::new(token),
            RefreshToken::new(refresh_token),
            user,
        ))
    }

    /// Whether any of the three entries is present, readable or not.
    pub async fn has_entries(&self) -> bool {
        for name in [TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY] {
            if !matches!(self.store.get(&self.key(name)).await, Ok(None)) {
                return true;
            }
        }
        false
    }

    async fn read(&self, name: &str) -> Option<String> {
        match self.store.get(&self.key(name)).await {
            Ok(Some(value)) => Some(value),
            Ok(None) => {
                debug!(entry = name, "Stored entry missing");
                None
            }
            Err(e) => {
                warn!(entry = name, error = %e, "Failed to read stored entry");
                None
            }
        }
    }

    /// Remove all three entries. Every removal is attempted; the first
    /// failure is returned.
    #[instrument(skip_all)]
    pub async fn clear(&self) -> Result<()> {
        let mut first_error = None;

        for name in [TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.store.remove(&self.key(name)).await {
                warn!(entry = name, error = %e, "Failed to remove stored entry");
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => {
                debug!("Credentials cleared");
                Ok(())
            }
        }
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("prefix", &self.prefix)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Minimal store so these tests do not depend on a storage backend crate.
    #[derive(Default)]
    struct MapStore {
        entries: Mutex<HashMap<String, String>>,
        fail_reads: bool,
    }

    #[async_trait]
    impl KeyValueStore for MapStore {
        async fn get(&self, key: &str) -> Result<Option<String>> {
            if self.fail_reads {
                return Err(Error::Storage(StorageError::Io {
                    key: key.to_string(),
                    message: "disk on fire".to_string(),
                }));
            }
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str) -> Result<()> {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn remove(&self, key: &str) -> Result<()> {
            self.entries.lock().unwrap().remove(key);
            Ok(())
        }
    }

    fn creds() -> Credentials {
        let mut user = UserProfile::new("u1", "Ada", "ada@example.com");
        user.avatar = Some("https://example.com/a.png".to_string());
        Credentials::new(AccessToken::new("T1"), RefreshToken::new("R1"), user)
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = CredentialStore::new(Arc::new(MapStore::default()), "taskmaster_auth_");

        store.save(&creds()).await.unwrap();

        assert_eq!(store.load().await, Some(creds()));
    }

    #[tokio::test]
    async fn uses_prefixed_keys() {
        let backend = Arc::new(MapStore::default());
        let store = CredentialStore::new(backend.clone(), "taskmaster_auth_");

        store.save(&creds()).await.unwrap();

        let entries = backend.entries.lock().unwrap();
        assert_eq!(entries.get("taskmaster_auth_token").unwrap(), "T1");
        assert_eq!(entries.get("taskmaster_auth_refresh_token").unwrap(), "R1");
        assert!(entries.get("taskmaster_auth_user").unwrap().contains("\"Ada\""));
    }

    #[tokio::test]
    async fn clear_then_load_is_none_even_when_empty() {
        let store = CredentialStore::new(Arc::new(MapStore::default()), "p_");

        store.clear().await.unwrap();
        assert!(store.load().await.is_none());

        store.save(&creds()).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.load().await.is_none());
    }

    #[tokio::test]
    async fn partial_set_loads_as_none() {
        let backend = Arc::new(MapStore::default());
        let store = CredentialStore::new(backend.clone(), "p_");
        store.save(&creds()).await.unwrap();

        backend.remove("p_refresh_token").await.unwrap();

        assert!(store.load().await.is_none());
    }

    #[tokio::test]
    async fn corrupt_user_loads_as_none() {
        let backend = Arc::new(MapStore::default());
        let store = CredentialStore::new(backend.clone(), "p_");
        store.save(&creds()).await.unwrap();

        backend.set("p_user", "{not json").await.unwrap();

        assert!(store.load().await.is_none());
    }

    #[tokio::test]
    async fn read_errors_load_as_none() {
        let store = CredentialStore::new(
            Arc::new(MapStore {
                fail_reads: true,
                ..Default::default()
            }),
            "p_",
        );
        assert!(store.load().await.is_none());
    }
}
