use tracing::instrument;

use taskmaster_core::{Result, UserProfile};

use crate::http::endpoints::{self, ServerUser};
use crate::session::{ApiRequest, SessionManager};

impl SessionManager {
    /// Fetch the signed-in user's profile from the server.
    ///
    /// Read-only: the session's cached profile is not updated.
    #[instrument(skip(self))]
    pub async fn fetch_profile(&self) -> Result<UserProfile> {
        let user: ServerUser = self.send_json(ApiRequest::get(endpoints::ME)).await?;
        Ok(user.into())
    }
}
