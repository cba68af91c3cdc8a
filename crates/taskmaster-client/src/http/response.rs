//! Buffered API responses.

use serde::de::DeserializeOwned;
use tracing::debug;

use taskmaster_core::error::{Error, ProtocolError};
use taskmaster_core::Result;

use super::endpoints::{ApiErrorBody, Envelope};

/// A fully read HTTP response: status code plus raw body.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: u16,
    body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Decode the body as `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| {
            debug!(status = self.status, error = %e, "Malformed response body");
            Error::generic(format!("malformed response body: {}", e))
        })
    }

    /// Decode a `{success, data}` envelope and return `data`.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T> {
        let envelope: Envelope<T> = self.json()?;
        if !envelope.success {
            return Err(Error::Protocol(ProtocolError::new(
                self.status,
                None,
                envelope.message,
            )));
        }
        envelope
            .data
            .ok_or_else(|| Error::generic("response envelope has no data"))
    }

    /// Turn a non-2xx response into a [`ProtocolError`].
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::Protocol(self.protocol_error()))
        }
    }

    /// The server's error message, if the body carries one.
    pub fn error_message(&self) -> Option<String> {
        self.error_body().and_then(|body| body.message)
    }

    pub fn protocol_error(&self) -> ProtocolError {
        match self.error_body() {
            Some(body) => ProtocolError::new(self.status, body.error, body.message),
            None => ProtocolError::new(self.status, None, None),
        }
    }

    fn error_body(&self) -> Option<ApiErrorBody> {
        serde_json::from_slice(&self.body).ok()
    }
}
