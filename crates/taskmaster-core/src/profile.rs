//! User profile attached to a session.

use serde::{Deserialize, Serialize};

/// Role assigned when the server does not send one.
pub const DEFAULT_ROLE: &str = "user";

/// The signed-in user's profile.
///
/// This is the persisted shape (the `user` storage entry); it is not the
/// server's login payload, which uses `_id` and optional fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

impl UserProfile {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            avatar: None,
            role: default_role(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}
