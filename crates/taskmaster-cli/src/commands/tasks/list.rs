//! List tasks command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::cli::ApiOptions;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Project id
    pub project: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: ListArgs, options: &ApiOptions) -> Result<()> {
    let session = session::require(options).await?;

    let tasks = session
        .manager
        .project_tasks(&args.project)
        .await
        .context("Failed to list tasks")?;

    if tasks.is_empty() {
        eprintln!("{}", "No tasks found.".dimmed());
        return Ok(());
    }

    output::json_list(&tasks, args.pretty)
}
