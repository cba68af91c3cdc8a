//! Session credentials and the secrets used to obtain them.

use std::fmt;

use crate::profile::UserProfile;
use crate::tokens::{AccessToken, RefreshToken, TokenPair};

/// A complete credential set: both tokens and the profile they belong to.
///
/// There is no partial form of this type; a session either has all three
/// parts or has no credentials at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: AccessToken,
    pub refresh_token: RefreshToken,
    pub user: UserProfile,
}

impl Credentials {
    pub fn new(
        access_token: AccessToken,
        refresh_token: RefreshToken,
        user: UserProfile,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            user,
        }
    }

    /// Replace both tokens, keeping the profile.
    pub fn rotate(&mut self, tokens: TokenPair) {
        self.access_token = tokens.access_token;
        self.refresh_token = tokens.refresh_token;
    }
}

/// Email and password for a login request.
///
/// The password is never exposed in Debug output.
#[derive(Clone)]
pub struct LoginDetails {
    email: String,
    password: String,
}

impl LoginDetails {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the password.
    ///
    /// # Security
    ///
    /// Use this only when constructing authentication requests.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for LoginDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginDetails")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Details for creating a new account.
#[derive(Clone)]
pub struct Registration {
    name: String,
    email: String,
    password: String,
}

impl Registration {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_details_hide_password_in_debug() {
        let details = LoginDetails::new("a@b.com", "secret123");
        let debug = format!("{:?}", details);
        assert!(debug.contains("a@b.com"));
        assert!(!debug.contains("secret123"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn registration_hides_password_in_debug() {
        let reg = Registration::new("A", "a@b.com", "hunter2");
        assert!(!format!("{:?}", reg).contains("hunter2"));
    }

    #[test]
    fn rotate_keeps_profile() {
        let user = UserProfile::new("1", "A", "a@b.com");
        let mut creds = Credentials::new(
            AccessToken::new("T1"),
            RefreshToken::new("R1"),
            user.clone(),
        );
        creds.rotate(TokenPair::new("T2", "R2"));
        assert_eq!(creds.access_token.as_str(), "T2");
        assert_eq!(creds.refresh_token.as_str(), "R2");
        assert_eq!(creds.user, user);
    }
}
