//! Update task command implementation.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::Args;

use taskmaster_core::models::TaskUpdate;

use super::{PriorityArg, StatusArg, parse_due};
use crate::cli::ApiOptions;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Task id
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,

    #[arg(long, value_enum)]
    pub priority: Option<PriorityArg>,

    /// Due date (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_parser = parse_due)]
    pub due: Option<DateTime<Utc>>,
}

pub async fn run(args: UpdateArgs, options: &ApiOptions) -> Result<()> {
    let update = TaskUpdate {
        title: args.title,
        description: args.description,
        status: args.status.map(Into::into),
        priority: args.priority.map(Into::into),
        due_date: args.due,
    };

    if update.is_empty() {
        bail!("Nothing to update. Pass at least one of --title, --description, --status, --priority or --due.");
    }

    let session = session::require(options).await?;

    let task = session
        .manager
        .update_task(&args.id, &update)
        .await
        .context("Failed to update task")?;

    output::success("Task updated");
    output::json_pretty(&task)
}
