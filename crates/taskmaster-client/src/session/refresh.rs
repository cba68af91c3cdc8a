//! Single-flight token refresh.
//!
//! The first request to see a 401 starts an exchange; requests that fail
//! while it runs wait on the same exchange. The exchange runs as its own
//! task, so a waiter that is dropped or times out never cancels it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::future::{BoxFuture, FutureExt, Shared};
use tracing::{debug, info, instrument, warn};

use taskmaster_core::error::{AuthError, Error};
use taskmaster_core::{AccessToken, AuthService};

use super::credential_store::CredentialStore;
use super::state::SessionState;

/// Why a refresh exchange did not produce a new access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshFailure {
    /// No refresh token was held. The endpoint was not called.
    MissingRefreshToken,
    /// The endpoint rejected the exchange, or it could not be reached.
    Rejected(String),
    /// The session was replaced or cleared while the exchange ran.
    SessionCleared,
    /// The exchange task was cancelled or panicked.
    Aborted,
}

impl From<RefreshFailure> for Error {
    fn from(failure: RefreshFailure) -> Self {
        match failure {
            RefreshFailure::SessionCleared => AuthError::AuthenticationRequired.into(),
            RefreshFailure::MissingRefreshToken
            | RefreshFailure::Rejected(_)
            | RefreshFailure::Aborted => AuthError::SessionExpired.into(),
        }
    }
}

/// Result shared by every waiter of one exchange.
pub type RefreshOutcome = Result<AccessToken, RefreshFailure>;

type InFlight = Shared<BoxFuture<'static, RefreshOutcome>>;

/// Coordinates refresh exchanges so at most one is outstanding.
#[derive(Clone)]
pub struct RefreshCoordinator {
    inner: Arc<CoordinatorInner>,
}

struct CoordinatorInner {
    auth: Arc<dyn AuthService>,
    state: SessionState,
    store: CredentialStore,
    in_flight: Mutex<Option<InFlight>>,
}

impl RefreshCoordinator {
    pub fn new(auth: Arc<dyn AuthService>, state: SessionState, store: CredentialStore) -> Self {
        Self {
            inner: Arc::new(CoordinatorInner {
                auth,
                state,
                store,
                in_flight: Mutex::new(None),
            }),
        }
    }

    /// Whether an exchange is currently outstanding.
    pub fn is_refreshing(&self) -> bool {
        self.inner.slot().is_some()
    }

    /// Join the outstanding exchange, or start one if none is running.
    ///
    /// On success the session has been rotated and persisted, and the new
    /// access token is returned. On failure the session has been cleared
    /// (except for [`RefreshFailure::SessionCleared`], where someone else
    /// already changed it).
    pub async fn refresh(&self) -> RefreshOutcome {
        self.join_or_start().await
    }

    fn join_or_start(&self) -> InFlight {
        let mut slot = self.inner.slot();

        if let Some(flight) = slot.as_ref() {
            debug!("Joining in-flight refresh");
            return flight.clone();
        }

        debug!("Starting refresh");
        let inner = Arc::clone(&self.inner);
        // The slot lock is held until the handle is stored, so `settle` in the
        // task always runs after the insert below.
        let task = tokio::spawn(async move {
            let outcome = inner.exchange().await;
            inner.settle();
            outcome
        });

        let flight = async move {
            match task.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(error = %e, "Refresh task did not complete");
                    Err(RefreshFailure::Aborted)
                }
            }
        }
        .boxed()
        .shared();

        *slot = Some(flight.clone());
        flight
    }
}

impl CoordinatorInner {
    fn slot(&self) -> MutexGuard<'_, Option<InFlight>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn settle(&self) {
        self.slot().take();
    }

    #[instrument(skip(self))]
    async fn exchange(&self) -> RefreshOutcome {
        let Some(refresh_token) = self.state.refresh_token() else {
            warn!("No refresh token held, forcing logout");
            self.force_logout().await;
            return Err(RefreshFailure::MissingRefreshToken);
        };

        info!("Refreshing session");

        match self.auth.refresh(&refresh_token).await {
            Ok(tokens) => {
                let access_token = tokens.access_token.clone();

                if !self.state.rotate_matching(tokens, &refresh_token) {
                    warn!("Session changed during refresh, discarding new tokens");
                    return Err(RefreshFailure::SessionCleared);
                }

                // The stored refresh token is now retired server-side.
                if let Some(credentials) = self.state.credentials() {
                    if let Err(e) = self.store.save(&credentials).await {
                        warn!(error = %e, "Failed to persist refreshed credentials, removing stored session");
                        if let Err(e) = self.store.clear().await {
                            warn!(error = %e, "Failed to clear stored credentials");
                        }
                    }
                }

                info!("Session refreshed");
                Ok(access_token)
            }
            Err(e) => {
                warn!(error = %e, "Refresh failed, forcing logout");
                self.force_logout().await;
                Err(RefreshFailure::Rejected(e.to_string()))
            }
        }
    }

    async fn force_logout(&self) {
        self.state.clear();
        if let Err(e) = self.store.clear().await {
            warn!(error = %e, "Failed to clear stored credentials");
        }
    }
}

impl std::fmt::Debug for RefreshCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshCoordinator")
            .field("refreshing", &self.is_refreshing())
            .finish()
    }
}
