//! HTTP implementation of the remote auth service.

use async_trait::async_trait;
use reqwest::Method;
use tracing::{debug, info, instrument};

use taskmaster_core::error::{
    AuthError, Error, AUTHENTICATION_FAILED_MESSAGE, GENERIC_ERROR_MESSAGE,
};
use taskmaster_core::{
    AccessToken, AuthService, Credentials, LoginDetails, RefreshToken, Registration, Result,
    TokenPair,
};

use crate::http::endpoints::{
    self, AuthPayload, Envelope, ForgotPasswordRequest, LoginRequest, RefreshTokenRequest,
    RefreshTokenResponse, RegisterRequest,
};
use crate::http::{ApiResponse, HttpClient};

/// Message used when registration is rejected without a reason.
pub const REGISTRATION_FAILED_MESSAGE: &str = "Registration failed";

/// [`AuthService`] backed by the TaskMaster `/auth/*` endpoints.
#[derive(Debug, Clone)]
pub struct HttpAuthService {
    http: HttpClient,
}

impl HttpAuthService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Read a login or registration response into a credential set.
    fn credentials_from(response: ApiResponse, default_message: &str) -> Result<Credentials> {
        if !response.is_success() {
            let message = response
                .error_message()
                .unwrap_or_else(|| default_message.to_string());
            return Err(AuthError::AuthenticationFailed(message).into());
        }

        let envelope: Envelope<AuthPayload> = response.json().map_err(|e| {
            debug!(error = %e, "Unreadable authentication payload");
            Error::generic(GENERIC_ERROR_MESSAGE)
        })?;

        if !envelope.success {
            let message = envelope
                .message
                .unwrap_or_else(|| default_message.to_string());
            return Err(AuthError::AuthenticationFailed(message).into());
        }

        envelope
            .data
            .map(Credentials::from)
            .ok_or_else(|| Error::generic(GENERIC_ERROR_MESSAGE))
    }
}

#[async_trait]
impl AuthService for HttpAuthService {
    #[instrument(skip(self, details), fields(email = %details.email()))]
    async fn login(&self, details: &LoginDetails) -> Result<Credentials> {
        info!("Logging in");

        let body = LoginRequest {
            email: details.email(),
            password: details.password(),
        };
        let response = self
            .http
            .send(self.http.request(Method::POST, endpoints::LOGIN).json(&body))
            .await?;

        Self::credentials_from(response, AUTHENTICATION_FAILED_MESSAGE)
    }

    #[instrument(skip(self, registration), fields(email = %registration.email()))]
    async fn register(&self, registration: &Registration) -> Result<Credentials> {
        info!("Registering account");

        let body = RegisterRequest {
            name: registration.name(),
            email: registration.email(),
            password: registration.password(),
        };
        let response = self
            .http
            .send(self.http.request(Method::POST, endpoints::REGISTER).json(&body))
            .await?;

        Self::credentials_from(response, REGISTRATION_FAILED_MESSAGE)
    }

    #[instrument(skip_all)]
    async fn refresh(&self, refresh_token: &RefreshToken) -> Result<TokenPair> {
        let body = RefreshTokenRequest {
            refresh_token: refresh_token.as_str(),
        };
        let response = self
            .http
            .send(
                self.http
                    .request(Method::POST, endpoints::REFRESH_TOKEN)
                    .json(&body),
            )
            .await?
            .error_for_status()?;

        let tokens: RefreshTokenResponse = response.json().map_err(|e| {
            debug!(error = %e, "Unreadable refresh payload");
            Error::generic(GENERIC_ERROR_MESSAGE)
        })?;

        Ok(tokens.into())
    }

    #[instrument(skip_all)]
    async fn logout(&self, access_token: &AccessToken) -> Result<()> {
        self.http
            .send(
                self.http
                    .request(Method::POST, endpoints::LOGOUT)
                    .bearer_auth(access_token.as_str())
                    .json(&serde_json::json!({})),
            )
            .await?
            .error_for_status()?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn forgot_password(&self, email: &str) -> Result<()> {
        let body = ForgotPasswordRequest { email };
        self.http
            .send(
                self.http
                    .request(Method::POST, endpoints::FORGOT_PASSWORD)
                    .json(&body),
            )
            .await?
            .error_for_status()?;
        Ok(())
    }
}
