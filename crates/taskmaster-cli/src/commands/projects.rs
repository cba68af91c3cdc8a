//! Project subcommand implementations.

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use colored::Colorize;

use taskmaster_core::models::ProjectFilter;

use crate::cli::ApiOptions;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct ProjectsCommand {
    #[command(subcommand)]
    pub command: ProjectsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProjectsSubcommand {
    /// List projects
    List(ListArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show projects in this state
    #[arg(long, value_enum, default_value_t = StatusArg::All)]
    pub status: StatusArg,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusArg {
    All,
    Completed,
    Ongoing,
    Pending,
}

impl From<StatusArg> for ProjectFilter {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::All => ProjectFilter::All,
            StatusArg::Completed => ProjectFilter::Completed,
            StatusArg::Ongoing => ProjectFilter::Ongoing,
            StatusArg::Pending => ProjectFilter::Pending,
        }
    }
}

pub async fn handle(cmd: ProjectsCommand, options: &ApiOptions) -> Result<()> {
    match cmd.command {
        ProjectsSubcommand::List(args) => list(args, options).await,
    }
}

async fn list(args: ListArgs, options: &ApiOptions) -> Result<()> {
    let session = session::require(options).await?;

    let projects = session
        .manager
        .list_projects(args.status.into())
        .await
        .context("Failed to list projects")?;

    if projects.is_empty() {
        eprintln!("{}", "No projects found.".dimmed());
        return Ok(());
    }

    output::json_list(&projects, args.pretty)
}
