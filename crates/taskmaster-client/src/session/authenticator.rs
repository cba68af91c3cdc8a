//! Attaches the session's bearer token to outgoing requests.

use reqwest::RequestBuilder;

use taskmaster_core::AccessToken;

use super::state::SessionState;

/// Reads the access token from [`SessionState`], never from storage.
#[derive(Debug, Clone)]
pub struct RequestAuthenticator {
    state: SessionState,
}

impl RequestAuthenticator {
    pub fn new(state: SessionState) -> Self {
        Self { state }
    }

    /// Add `Authorization: Bearer <token>` if a session is held; otherwise
    /// leave the request unauthenticated.
    pub fn authenticate(&self, request: RequestBuilder) -> RequestBuilder {
        match self.state.access_token() {
            Some(token) => Self::with_token(request, &token),
            None => request,
        }
    }

    /// Authenticate with a specific token, as when replaying after a refresh.
    pub fn with_token(request: RequestBuilder, token: &AccessToken) -> RequestBuilder {
        request.bearer_auth(token.as_str())
    }
}
