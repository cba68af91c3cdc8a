//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands::auth::AuthCommand;
use crate::commands::projects::ProjectsCommand;
use crate::commands::tasks::TasksCommand;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Command-line client for the TaskMaster API.
#[derive(Parser, Debug)]
#[command(name = "taskmaster")]
#[command(author, version = env!("TASKMASTER_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub api: ApiOptions,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the API lives and where the session is kept.
#[derive(Args, Debug, Clone)]
pub struct ApiOptions {
    /// API base URL
    #[arg(long, env = "TASKMASTER_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Directory holding the persisted session (defaults to the platform data dir)
    #[arg(long, env = "TASKMASTER_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Per-request timeout in seconds, including any token refresh
    #[arg(long, default_value_t = 10, global = true)]
    pub timeout_secs: u64,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in, sign out and inspect the session
    Auth(AuthCommand),

    /// Project operations
    Projects(ProjectsCommand),

    /// Task operations
    Tasks(TasksCommand),
}
