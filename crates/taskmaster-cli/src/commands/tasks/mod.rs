//! Task subcommand implementations.

mod create;
mod delete;
mod get;
mod list;
mod toggle;
mod update;

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};

use taskmaster_core::models::{TaskPriority, TaskStatus};

use crate::cli::ApiOptions;

#[derive(Args, Debug)]
pub struct TasksCommand {
    #[command(subcommand)]
    pub command: TasksSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TasksSubcommand {
    /// List the tasks of a project
    List(list::ListArgs),

    /// Fetch a single task
    Get(get::GetArgs),

    /// Create a task in a project
    Create(create::CreateArgs),

    /// Update fields of a task
    Update(update::UpdateArgs),

    /// Mark a task completed, or reopen it
    Toggle(toggle::ToggleArgs),

    /// Delete a task
    Delete(delete::DeleteArgs),
}

pub async fn handle(cmd: TasksCommand, options: &ApiOptions) -> Result<()> {
    match cmd.command {
        TasksSubcommand::List(args) => list::run(args, options).await,
        TasksSubcommand::Get(args) => get::run(args, options).await,
        TasksSubcommand::Create(args) => create::run(args, options).await,
        TasksSubcommand::Update(args) => update::run(args, options).await,
        TasksSubcommand::Toggle(args) => toggle::run(args, options).await,
        TasksSubcommand::Delete(args) => delete::run(args, options).await,
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusArg {
    Todo,
    InProgress,
    Review,
    Completed,
}

impl From<StatusArg> for TaskStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Todo => TaskStatus::Todo,
            StatusArg::InProgress => TaskStatus::InProgress,
            StatusArg::Review => TaskStatus::Review,
            StatusArg::Completed => TaskStatus::Completed,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
}

impl From<PriorityArg> for TaskPriority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::Low => TaskPriority::Low,
            PriorityArg::Medium => TaskPriority::Medium,
            PriorityArg::High => TaskPriority::High,
        }
    }
}

/// Parse a due date given as RFC 3339 or as a plain `YYYY-MM-DD` (midnight UTC).
fn parse_due(value: &str) -> Result<chrono::DateTime<chrono::Utc>, String> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&chrono::Utc));
    }
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| format!("invalid date {:?}, expected YYYY-MM-DD or RFC 3339", value))
}
