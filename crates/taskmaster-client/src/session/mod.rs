//! Session management: state, persistence, request authentication and
//! single-flight token refresh.

mod authenticator;
mod credential_store;
mod manager;
mod refresh;
mod request;
mod state;

pub use authenticator::RequestAuthenticator;
pub use credential_store::CredentialStore;
pub use manager::SessionManager;
pub use refresh::{RefreshCoordinator, RefreshFailure, RefreshOutcome};
pub use request::ApiRequest;
pub use state::SessionState;
