//! Observable authentication status.

use serde::Serialize;

use crate::profile::UserProfile;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthPhase {
    /// Stored credentials have not been checked yet.
    Pending,
    /// A credential set is held.
    Authenticated,
    /// No credentials; the user must log in.
    Unauthenticated,
}

/// What observers see of the session. Carries no tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthStatus {
    pub phase: AuthPhase,
    pub user: Option<UserProfile>,
}

impl AuthStatus {
    pub fn pending() -> Self {
        Self {
            phase: AuthPhase::Pending,
            user: None,
        }
    }

    pub fn authenticated(user: UserProfile) -> Self {
        Self {
            phase: AuthPhase::Authenticated,
            user: Some(user),
        }
    }

    pub fn unauthenticated() -> Self {
        Self {
            phase: AuthPhase::Unauthenticated,
            user: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase == AuthPhase::Authenticated
    }

    /// True until the initial restore has settled.
    pub fn is_pending(&self) -> bool {
        self.phase == AuthPhase::Pending
    }

    pub fn current_user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_is_neither_authenticated_nor_confirmed_out() {
        let status = AuthStatus::pending();
        assert!(status.is_pending());
        assert!(!status.is_authenticated());
        assert_ne!(status, AuthStatus::unauthenticated());
    }
}
