//! The session manager: login, logout and authenticated requests with
//! transparent token refresh.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use taskmaster_core::error::{AuthError, TransportError};
use taskmaster_core::{
    AccessToken, AuthService, AuthStatus, KeyValueStore, LoginDetails, Registration, Result,
    StatusStream, UserProfile,
};

use crate::auth::HttpAuthService;
use crate::config::ClientConfig;
use crate::http::{duration_ms, ApiResponse, HttpClient};

use super::authenticator::RequestAuthenticator;
use super::credential_store::CredentialStore;
use super::refresh::RefreshCoordinator;
use super::request::ApiRequest;
use super::state::SessionState;

/// An authenticated connection to the TaskMaster API.
///
/// Owns the session state, persists it through a [`KeyValueStore`], and sends
/// requests with the current access token. A 401 triggers one shared refresh
/// exchange; the request is then replayed once with the new token. If the
/// refresh fails the session is torn down and the caller gets
/// [`ErrorKind::SessionExpired`](taskmaster_core::ErrorKind::SessionExpired).
///
/// Cheap to clone; clones share the same session.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use taskmaster_client::{ClientConfig, SessionManager};
/// use taskmaster_core::models::ProjectFilter;
/// use taskmaster_core::{ApiUrl, LoginDetails};
/// # use taskmaster_core::KeyValueStore;
///
/// # async fn example(store: Arc<dyn KeyValueStore>) -> taskmaster_core::Result<()> {
/// let config = ClientConfig::new(ApiUrl::new("https://api.example.com/api")?);
/// let manager = SessionManager::new(config, store)?;
///
/// if !manager.restore().await {
///     manager.login(LoginDetails::new("ada@example.com", "secret")).await?;
/// }
///
/// let projects = manager.list_projects(ProjectFilter::All).await?;
/// println!("{} projects", projects.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<ManagerInner>,
}

struct ManagerInner {
    config: ClientConfig,
    http: HttpClient,
    auth: Arc<dyn AuthService>,
    state: SessionState,
    store: CredentialStore,
    authenticator: RequestAuthenticator,
    refresh: RefreshCoordinator,
}

impl SessionManager {
    /// Create a manager that talks to the configured API over HTTP.
    pub fn new(config: ClientConfig, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let http = HttpClient::new(&config)?;
        let auth = Arc::new(HttpAuthService::new(http.clone()));
        Ok(Self::build(config, http, store, auth))
    }

    /// Create a manager with a custom auth service. Ordinary requests still
    /// go to the configured base URL.
    pub fn with_auth_service(
        config: ClientConfig,
        store: Arc<dyn KeyValueStore>,
        auth: Arc<dyn AuthService>,
    ) -> Result<Self> {
        let http = HttpClient::new(&config)?;
        Ok(Self::build(config, http, store, auth))
    }

    fn build(
        config: ClientConfig,
        http: HttpClient,
        store: Arc<dyn KeyValueStore>,
        auth: Arc<dyn AuthService>,
    ) -> Self {
        let state = SessionState::new();
        let store = CredentialStore::new(store, config.storage_prefix());
        let authenticator = RequestAuthenticator::new(state.clone());
        let refresh = RefreshCoordinator::new(auth.clone(), state.clone(), store.clone());

        Self {
            inner: Arc::new(ManagerInner {
                config,
                http,
                auth,
                state,
                store,
                authenticator,
                refresh,
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    // ------------------------------------------------------------------
    // Session lifecycle
    // ------------------------------------------------------------------

    /// Load persisted credentials. Leaves the `Pending` phase either way.
    ///
    /// A partial or unparseable stored set is removed.
    ///
    /// Returns whether a session was restored.
    #[instrument(skip(self))]
    pub async fn restore(&self) -> bool {
        match self.inner.store.load().await {
            Some(credentials) => {
                info!(user = %credentials.user.id, "Restored session");
                self.inner.state.establish(credentials);
                true
            }
            None => {
                if self.inner.store.has_entries().await {
                    warn!("Discarding incomplete or unreadable stored session");
                    if let Err(e) = self.inner.store.clear().await {
                        warn!(error = %e, "Failed to remove stored session");
                    }
                } else {
                    debug!("No stored session");
                }
                self.inner.state.clear();
                false
            }
        }
    }

    /// Log in, persist the credentials, and become authenticated.
    ///
    /// On failure the session state is left as it was.
    #[instrument(skip(self, details), fields(email = %details.email()))]
    pub async fn login(&self, details: LoginDetails) -> Result<UserProfile> {
        let credentials = self.inner.auth.login(&details).await?;
        self.inner.store.save(&credentials).await?;

        let user = credentials.user.clone();
        self.inner.state.establish(credentials);
        info!(user = %user.id, "Logged in");
        Ok(user)
    }

    /// Create an account and sign into it.
    #[instrument(skip(self, registration), fields(email = %registration.email()))]
    pub async fn register(&self, registration: Registration) -> Result<UserProfile> {
        let credentials = self.inner.auth.register(&registration).await?;
        self.inner.store.save(&credentials).await?;

        let user = credentials.user.clone();
        self.inner.state.establish(credentials);
        info!(user = %user.id, "Registered");
        Ok(user)
    }

    /// End the session.
    ///
    /// The server is told first, best effort. The local session is always
    /// torn down; only a storage failure is reported.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        if let Some(token) = self.inner.state.access_token() {
            if let Err(e) = self.inner.auth.logout(&token).await {
                warn!(error = %e, "Server logout failed, clearing local session anyway");
            }
        }

        self.inner.state.clear();
        self.inner.store.clear().await?;
        info!("Logged out");
        Ok(())
    }

    /// Ask the server to email a password reset link.
    pub async fn forgot_password(&self, email: &str) -> Result<()> {
        self.inner.auth.forgot_password(email).await
    }

    /// Refresh the tokens now, joining any exchange already in flight.
    pub async fn refresh(&self) -> Result<AccessToken> {
        self.inner.refresh.refresh().await.map_err(Into::into)
    }

    // ------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------

    pub fn status(&self) -> AuthStatus {
        self.inner.state.status()
    }

    pub fn is_authenticated(&self) -> bool {
        self.status().is_authenticated()
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.status().current_user().cloned()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthStatus> {
        self.inner.state.subscribe()
    }

    pub fn changes(&self) -> impl StatusStream + use<> {
        self.inner.state.changes()
    }

    /// Whether a refresh exchange is outstanding.
    pub fn is_refreshing(&self) -> bool {
        self.inner.refresh.is_refreshing()
    }

    // ------------------------------------------------------------------
    // Requests
    // ------------------------------------------------------------------

    /// Send an authenticated request.
    ///
    /// Non-401 responses are returned as-is, whatever their status. A 401
    /// waits for the shared refresh and replays once; a second 401 fails with
    /// `AuthenticationRequired`. The whole call, refresh included, is bounded
    /// by the configured request timeout.
    #[instrument(
        skip(self, request),
        fields(request_id = %request.id(), method = %request.method(), path = request.path())
    )]
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let timeout = self.inner.config.request_timeout();

        match tokio::time::timeout(timeout, self.send_with_refresh(request)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout_ms = duration_ms(timeout), "Request timed out");
                Err(TransportError::Timeout {
                    duration_ms: duration_ms(timeout),
                }
                .into())
            }
        }
    }

    /// Send an authenticated request and decode the `data` of a successful
    /// `{success, data}` response.
    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        self.send(request).await?.error_for_status()?.into_data()
    }

    async fn send_with_refresh(&self, mut request: ApiRequest) -> Result<ApiResponse> {
        let response = self.dispatch(&request, None).await?;
        if !response.is_unauthorized() {
            return Ok(response);
        }

        if request.is_retried() {
            debug!("Retried request rejected again");
            return Err(AuthError::AuthenticationRequired.into());
        }

        debug!("Received 401, waiting for refresh");
        request.mark_retried();
        let token = self.inner.refresh.refresh().await?;

        let response = self.dispatch(&request, Some(&token)).await?;
        if response.is_unauthorized() {
            warn!("Replayed request rejected after refresh");
            return Err(AuthError::AuthenticationRequired.into());
        }
        Ok(response)
    }

    async fn dispatch(
        &self,
        request: &ApiRequest,
        token: Option<&AccessToken>,
    ) -> Result<ApiResponse> {
        let builder = request.apply(
            self.inner
                .http
                .request(request.method().clone(), request.path()),
        );
        let builder = match token {
            Some(token) => RequestAuthenticator::with_token(builder, token),
            None => self.inner.authenticator.authenticate(builder),
        };

        debug!(replay = token.is_some(), "Dispatching request");
        self.inner.http.send(builder).await
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("base_url", self.inner.config.base_url())
            .field("state", &self.inner.state)
            .finish()
    }
}
