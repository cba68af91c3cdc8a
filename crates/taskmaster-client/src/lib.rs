//! taskmaster-client - Authenticated session manager for the TaskMaster API.
//!
//! [`SessionManager`] keeps the signed-in session in memory, persists it
//! through a [`KeyValueStore`](taskmaster_core::KeyValueStore), attaches the
//! access token to every request, and refreshes it transparently when the
//! server answers 401. Concurrent 401s share one refresh exchange.

mod api;
mod auth;
mod config;
mod http;
mod session;

pub use auth::{HttpAuthService, REGISTRATION_FAILED_MESSAGE};
pub use config::{ClientConfig, DEFAULT_REQUEST_TIMEOUT, DEFAULT_STORAGE_PREFIX};
pub use http::{ApiResponse, HttpClient};
pub use session::{
    ApiRequest, CredentialStore, RefreshCoordinator, RefreshFailure, RefreshOutcome,
    RequestAuthenticator, SessionManager, SessionState,
};

/// Re-exported so callers can build [`ApiRequest`]s without a direct reqwest
/// dependency.
pub use reqwest::Method;
