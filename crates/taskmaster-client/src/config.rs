//! Client configuration.

use std::time::Duration;

use taskmaster_core::ApiUrl;

/// Default bound on a single API call, including any refresh it waits on.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default namespace for persisted session entries.
pub const DEFAULT_STORAGE_PREFIX: &str = "taskmaster_auth_";

/// Configuration for a [`SessionManager`](crate::SessionManager).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use taskmaster_client::ClientConfig;
/// use taskmaster_core::ApiUrl;
///
/// let config = ClientConfig::new(ApiUrl::new("https://api.example.com/api").unwrap())
///     .with_request_timeout(Duration::from_secs(5));
/// assert_eq!(config.storage_prefix(), "taskmaster_auth_");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: ApiUrl,
    request_timeout: Duration,
    storage_prefix: String,
    user_agent: String,
}

impl ClientConfig {
    pub fn new(base_url: ApiUrl) -> Self {
        Self {
            base_url,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            storage_prefix: DEFAULT_STORAGE_PREFIX.to_string(),
            user_agent: concat!("taskmaster/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_storage_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.storage_prefix = prefix.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn base_url(&self) -> &ApiUrl {
        &self.base_url
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn storage_prefix(&self) -> &str {
        &self.storage_prefix
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::new(ApiUrl::new("http://localhost:5000/api").unwrap());
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.storage_prefix(), DEFAULT_STORAGE_PREFIX);
        assert!(config.user_agent().starts_with("taskmaster/"));
    }

    #[test]
    fn builder_overrides() {
        let config = ClientConfig::new(ApiUrl::new("http://localhost:5000/api").unwrap())
            .with_request_timeout(Duration::from_millis(250))
            .with_storage_prefix("test_")
            .with_user_agent("agent/1");
        assert_eq!(config.request_timeout(), Duration::from_millis(250));
        assert_eq!(config.storage_prefix(), "test_");
        assert_eq!(config.user_agent(), "agent/1");
    }
}
