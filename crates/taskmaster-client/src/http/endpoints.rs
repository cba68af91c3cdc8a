//! Endpoint paths and wire types for the TaskMaster API.

use serde::{Deserialize, Serialize};

use taskmaster_core::{AccessToken, Credentials, RefreshToken, TokenPair, UserProfile};

// ============================================================================
// Endpoint Paths (relative to the API base URL)
// ============================================================================

pub const LOGIN: &str = "auth/login";
pub const REGISTER: &str = "auth/register";
pub const REFRESH_TOKEN: &str = "auth/refresh-token";
pub const LOGOUT: &str = "auth/logout";
pub const FORGOT_PASSWORD: &str = "auth/forgot-password";
pub const ME: &str = "auth/me";
pub const PROJECTS: &str = "projects";
pub const TASKS: &str = "tasks";

pub fn project_tasks(project_id: &str) -> String {
    format!("{}/{}/tasks", PROJECTS, project_id)
}

pub fn task(task_id: &str) -> String {
    format!("{}/{}", TASKS, task_id)
}

// ============================================================================
// Request Bodies
// ============================================================================

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest<'a> {
    pub refresh_token: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ForgotPasswordRequest<'a> {
    pub email: &'a str,
}

// ============================================================================
// Response Bodies
// ============================================================================

/// The `{success, data, message}` wrapper used by most endpoints.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

fn default_success() -> bool {
    true
}

/// A user as the server sends it (`_id`, optional role).
#[derive(Debug, Deserialize)]
pub struct ServerUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl From<ServerUser> for UserProfile {
    fn from(user: ServerUser) -> Self {
        let mut profile = UserProfile::new(user.id, user.name, user.email);
        profile.avatar = user.avatar;
        if let Some(role) = user.role {
            profile.role = role;
        }
        profile
    }
}

/// Login and registration payload: tokens flattened next to the user fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    pub token: String,
    pub refresh_token: String,
    #[serde(flatten)]
    pub user: ServerUser,
}

impl From<AuthPayload> for Credentials {
    fn from(payload: AuthPayload) -> Self {
        Credentials::new(
            AccessToken::new(payload.token),
            RefreshToken::new(payload.refresh_token),
            payload.user.into(),
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPayload {
    pub token: String,
    pub refresh_token: String,
}

/// Refresh response. Accepted either bare or wrapped in an envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RefreshTokenResponse {
    Bare(TokenPayload),
    Enveloped { data: TokenPayload },
}

impl From<RefreshTokenResponse> for TokenPair {
    fn from(response: RefreshTokenResponse) -> Self {
        let payload = match response {
            RefreshTokenResponse::Bare(payload) => payload,
            RefreshTokenResponse::Enveloped { data } => data,
        };
        TokenPair::new(payload.token, payload.refresh_token)
    }
}

/// Error body. The API sends `message`; some middleware adds `error`.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
