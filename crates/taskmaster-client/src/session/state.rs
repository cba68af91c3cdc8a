//! In-memory session state and its observable status.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::debug;

use taskmaster_core::{
    AccessToken, AuthStatus, Credentials, RefreshToken, StatusStream, TokenPair,
};

/// The process-wide session: the current credentials plus a published
/// [`AuthStatus`].
///
/// Only three transitions mutate it: [`establish`](Self::establish),
/// [`rotate`](Self::rotate) and [`clear`](Self::clear). Each one updates the
/// credentials and publishes the new status under the same lock, so an
/// observer never sees a status that disagrees with the held credentials.
///
/// Cloning is cheap; clones share the same state.
#[derive(Clone)]
pub struct SessionState {
    inner: Arc<StateInner>,
}

struct StateInner {
    credentials: Mutex<Option<Credentials>>,
    status: watch::Sender<AuthStatus>,
}

impl SessionState {
    /// A fresh state in the `Pending` phase.
    pub fn new() -> Self {
        let (status, _) = watch::channel(AuthStatus::pending());
        Self {
            inner: Arc::new(StateInner {
                credentials: Mutex::new(None),
                status,
            }),
        }
    }

    /// Become authenticated with `credentials`.
    pub fn establish(&self, credentials: Credentials) {
        let mut held = self.lock();
        let status = AuthStatus::authenticated(credentials.user.clone());
        *held = Some(credentials);
        self.inner.status.send_replace(status);
        debug!("Session established");
    }

    /// Replace both tokens, keeping the profile.
    ///
    /// Returns `false` without notifying when no credentials are held.
    pub fn rotate(&self, tokens: TokenPair) -> bool {
        let mut held = self.lock();
        Self::rotate_locked(&mut held, &self.inner.status, tokens)
    }

    /// Like [`rotate`](Self::rotate), but only while the held refresh token is
    /// still `expected`. A logout or new login since the exchange started
    /// makes this a no-op.
    pub(crate) fn rotate_matching(&self, tokens: TokenPair, expected: &RefreshToken) -> bool {
        let mut held = self.lock();
        if !held.as_ref().is_some_and(|c| c.refresh_token == *expected) {
            return false;
        }
        Self::rotate_locked(&mut held, &self.inner.status, tokens)
    }

    fn rotate_locked(
        held: &mut Option<Credentials>,
        status: &watch::Sender<AuthStatus>,
        tokens: TokenPair,
    ) -> bool {
        match held.as_mut() {
            Some(creds) => {
                creds.rotate(tokens);
                status.send_replace(AuthStatus::authenticated(creds.user.clone()));
                debug!("Session tokens rotated");
                true
            }
            None => false,
        }
    }

    /// Drop the credentials and become unauthenticated.
    pub fn clear(&self) {
        let mut held = self.lock();
        *held = None;
        self.inner.status.send_replace(AuthStatus::unauthenticated());
        debug!("Session cleared");
    }

    /// The current status.
    pub fn status(&self) -> AuthStatus {
        self.inner.status.borrow().clone()
    }

    /// A receiver that observes every published status.
    pub fn subscribe(&self) -> watch::Receiver<AuthStatus> {
        self.inner.status.subscribe()
    }

    /// A stream yielding the status after each transition from now on.
    ///
    /// Transitions that happen faster than the consumer polls are coalesced;
    /// the stream always yields the latest status. It ends when every clone
    /// of this state has been dropped.
    pub fn changes(&self) -> impl StatusStream + use<> {
        let mut rx = self.subscribe();
        async_stream::stream! {
            while rx.changed().await.is_ok() {
                let status = rx.borrow_and_update().clone();
                yield status;
            }
        }
    }

    pub(crate) fn access_token(&self) -> Option<AccessToken> {
        self.lock().as_ref().map(|c| c.access_token.clone())
    }

    pub(crate) fn refresh_token(&self) -> Option<RefreshToken> {
        self.lock().as_ref().map(|c| c.refresh_token.clone())
    }

    pub(crate) fn credentials(&self) -> Option<Credentials> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Credentials>> {
        self.inner
            .credentials
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("status", &self.status())
            .finish()
    }
}
