//! Error types for the taskmaster toolkit.
//!
//! A single error type with explicit variants for transport, authentication,
//! protocol, storage and input validation failures. [`Error::kind`] collapses
//! them onto the five categories callers branch on.

use std::fmt;
use thiserror::Error;

/// Message used when the server rejects a login without saying why.
pub const AUTHENTICATION_FAILED_MESSAGE: &str = "Authentication failed. Please try again.";

/// Message used for failures that fit no other category.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again later.";

/// The unified error type for taskmaster operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, TLS).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (rejected login, missing or expired session).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Non-authentication HTTP errors returned by the API.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Durable storage failures.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Input validation errors.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Anything that could not be classified.
    #[error("{message}")]
    Generic { message: String },
}

/// Coarse error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Login or registration rejected by the server.
    AuthenticationFailed,
    /// An operation needed a session and none was usable.
    AuthenticationRequired,
    /// The session could not be refreshed and was torn down.
    SessionExpired,
    /// The remote service could not be reached.
    Network,
    /// Everything else.
    Generic,
}

impl Error {
    /// Create a generic error with the given message.
    pub fn generic(message: impl Into<String>) -> Self {
        Error::Generic {
            message: message.into(),
        }
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport(_) => ErrorKind::Network,
            Error::Auth(AuthError::AuthenticationFailed(_)) => ErrorKind::AuthenticationFailed,
            Error::Auth(AuthError::AuthenticationRequired) => ErrorKind::AuthenticationRequired,
            Error::Auth(AuthError::SessionExpired) => ErrorKind::SessionExpired,
            Error::Protocol(_)
            | Error::Storage(_)
            | Error::InvalidInput(_)
            | Error::Generic { .. } => ErrorKind::Generic,
        }
    }

    /// Returns true if the session was torn down because it could not be refreshed.
    pub fn is_session_expired(&self) -> bool {
        self.kind() == ErrorKind::SessionExpired
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Login or registration rejected by the server.
    #[error("{0}")]
    AuthenticationFailed(String),

    /// No usable session for an operation that needs one.
    #[error("authentication required")]
    AuthenticationRequired,

    /// The refresh exchange failed; the session has been cleared.
    #[error("session expired, please log in again")]
    SessionExpired,
}

/// Protocol-level errors from API responses.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Machine-readable error code (if present).
    pub error: Option<String>,
    /// Error message from the server.
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref error) = self.error {
            write!(f, " [{}]", error)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, error: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            error,
            message,
        }
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401
    }
}

/// Durable storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure.
    #[error("I/O error on '{key}': {message}")]
    Io { key: String, message: String },

    /// A stored entry could not be encoded or decoded.
    #[error("corrupt entry '{key}': {message}")]
    Corrupt { key: String, message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid storage key.
    #[error("invalid storage key '{value}': {reason}")]
    StorageKey { value: String, reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
