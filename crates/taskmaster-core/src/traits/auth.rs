//! Remote auth service trait.

use async_trait::async_trait;

use crate::{AccessToken, Credentials, LoginDetails, RefreshToken, Registration, Result, TokenPair};

/// The remote service that issues and revokes credentials.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange an email and password for a credential set.
    async fn login(&self, details: &LoginDetails) -> Result<Credentials>;

    /// Create an account and return its first credential set.
    async fn register(&self, registration: &Registration) -> Result<Credentials>;

    /// Exchange a refresh token for a new token pair. Both tokens rotate.
    async fn refresh(&self, refresh_token: &RefreshToken) -> Result<TokenPair>;

    /// Revoke the session server-side.
    async fn logout(&self, access_token: &AccessToken) -> Result<()>;

    /// Ask the server to send a password reset email.
    async fn forgot_password(&self, email: &str) -> Result<()>;
}
