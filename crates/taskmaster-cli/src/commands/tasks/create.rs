//! Create task command implementation.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;

use taskmaster_core::models::NewTask;

use super::{PriorityArg, StatusArg, parse_due};
use crate::cli::ApiOptions;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Project id
    #[arg(long)]
    pub project: String,

    /// Task title
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,

    #[arg(long, value_enum)]
    pub priority: Option<PriorityArg>,

    /// Due date (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_parser = parse_due)]
    pub due: Option<DateTime<Utc>>,

    /// Tag to attach (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Parent task id
    #[arg(long)]
    pub parent: Option<String>,
}

pub async fn run(args: CreateArgs, options: &ApiOptions) -> Result<()> {
    let session = session::require(options).await?;

    let mut task = NewTask::new(args.project, args.title);
    task.description = args.description;
    task.status = args.status.map(Into::into);
    task.priority = args.priority.map(Into::into);
    task.due_date = args.due;
    task.tags = args.tags;
    task.parent = args.parent;

    let created = session
        .manager
        .create_task(&task)
        .await
        .context("Failed to create task")?;

    output::success("Task created");
    output::field("ID", &created.id);
    output::field("Title", &created.title);

    Ok(())
}
