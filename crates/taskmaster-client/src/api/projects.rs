use tracing::{debug, instrument};

use taskmaster_core::models::{Project, ProjectFilter};
use taskmaster_core::Result;

use crate::http::endpoints;
use crate::session::{ApiRequest, SessionManager};

impl SessionManager {
    /// List the projects visible to the signed-in user.
    #[instrument(skip(self))]
    pub async fn list_projects(&self, filter: ProjectFilter) -> Result<Vec<Project>> {
        let mut request = ApiRequest::get(endpoints::PROJECTS);
        if let Some(status) = filter.query_value() {
            request = request.query("status", status);
        }

        let projects: Vec<Project> = self.send_json(request).await?;
        debug!(count = projects.len(), "Listed projects");
        Ok(projects)
    }
}
