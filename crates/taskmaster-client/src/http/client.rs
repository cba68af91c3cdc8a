//! HTTP client for the TaskMaster API.

use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use tracing::{debug, trace};

use taskmaster_core::error::{Error, TransportError};
use taskmaster_core::{ApiUrl, Result};

use crate::config::ClientConfig;

use super::response::ApiResponse;

/// Thin wrapper over `reqwest::Client` bound to one API base URL.
///
/// It does not know about sessions: authentication headers are added by
/// the caller.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: ApiUrl,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| TransportError::Http {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url().clone(),
            timeout: config.request_timeout(),
        })
    }

    pub fn base_url(&self) -> &ApiUrl {
        &self.base_url
    }

    /// Start a request to `path`, relative to the base URL.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.base_url.endpoint(path);
        debug!(%method, %url, "Building request");
        self.client.request(method, url)
    }

    /// Send a request and buffer its body.
    ///
    /// Only transport failures are errors here; every HTTP status, 401
    /// included, comes back as an [`ApiResponse`].
    pub async fn send(&self, request: RequestBuilder) -> Result<ApiResponse> {
        let response = request
            .send()
            .await
            .map_err(|e| map_transport(e, self.timeout))?;

        let status = response.status().as_u16();
        trace!(status, "HTTP response");

        let body = response
            .bytes()
            .await
            .map_err(|e| map_transport(e, self.timeout))?;

        Ok(ApiResponse::new(status, body.to_vec()))
    }
}

/// Classify a reqwest failure.
pub(crate) fn map_transport(err: reqwest::Error, timeout: Duration) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout {
            duration_ms: duration_ms(timeout),
        }
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}

pub(crate) fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
