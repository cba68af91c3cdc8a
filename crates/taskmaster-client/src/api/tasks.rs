use tracing::{debug, instrument};

use taskmaster_core::models::{NewTask, Task, TaskUpdate};
use taskmaster_core::Result;

use crate::http::endpoints;
use crate::session::{ApiRequest, SessionManager};

use super::path_id;

impl SessionManager {
    /// List the tasks of one project.
    #[instrument(skip(self))]
    pub async fn project_tasks(&self, project_id: &str) -> Result<Vec<Task>> {
        let path = endpoints::project_tasks(path_id(project_id)?);
        let tasks: Vec<Task> = self.send_json(ApiRequest::get(path)).await?;
        debug!(count = tasks.len(), "Listed tasks");
        Ok(tasks)
    }

    #[instrument(skip(self))]
    pub async fn get_task(&self, task_id: &str) -> Result<Task> {
        let path = endpoints::task(path_id(task_id)?);
        self.send_json(ApiRequest::get(path)).await
    }

    #[instrument(skip(self, task), fields(project = %task.project))]
    pub async fn create_task(&self, task: &NewTask) -> Result<Task> {
        let request = ApiRequest::post(endpoints::TASKS).json(task)?;
        self.send_json(request).await
    }

    #[instrument(skip(self, update))]
    pub async fn update_task(&self, task_id: &str, update: &TaskUpdate) -> Result<Task> {
        let path = endpoints::task(path_id(task_id)?);
        let request = ApiRequest::put(path).json(update)?;
        self.send_json(request).await
    }

    /// Mark a task completed, or reopen it if it already is.
    pub async fn toggle_task_completion(&self, task: &Task) -> Result<Task> {
        self.update_task(&task.id, &TaskUpdate::status(task.status.toggled()))
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_task(&self, task_id: &str) -> Result<()> {
        let path = endpoints::task(path_id(task_id)?);
        self.send(ApiRequest::delete(path))
            .await?
            .error_for_status()?;
        Ok(())
    }
}
