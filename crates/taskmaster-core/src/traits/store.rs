//! Durable key-value storage trait.

use async_trait::async_trait;

use crate::Result;

/// Opaque string storage keyed by name.
///
/// Each call is independent; implementations give no atomicity across keys.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value. A missing key is `Ok(None)`.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any existing one.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value. Removing a missing key succeeds.
    async fn remove(&self, key: &str) -> Result<()>;
}
