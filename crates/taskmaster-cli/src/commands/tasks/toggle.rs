//! Toggle task completion command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::ApiOptions;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct ToggleArgs {
    /// Task id
    pub id: String,
}

pub async fn run(args: ToggleArgs, options: &ApiOptions) -> Result<()> {
    let session = session::require(options).await?;

    let task = session
        .manager
        .get_task(&args.id)
        .await
        .context("Failed to fetch task")?;

    let task = session
        .manager
        .toggle_task_completion(&task)
        .await
        .context("Failed to update task")?;

    let status = serde_json::to_value(task.status)?;
    output::success(&format!(
        "{} is now {}",
        task.title,
        status.as_str().unwrap_or_default()
    ));

    Ok(())
}
