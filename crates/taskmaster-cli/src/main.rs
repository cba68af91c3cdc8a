//! taskmaster - command-line client for the TaskMaster API.
//!
//! A thin wrapper over `taskmaster-client`. Each invocation restores the
//! session persisted under the data directory, runs one command, and leaves
//! any refreshed tokens on disk for the next one.

mod cli;
mod commands;
mod output;
mod session;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{auth, projects, tasks};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let result = match cli.command {
        Commands::Auth(cmd) => auth::handle(cmd, &cli.api).await,
        Commands::Projects(cmd) => projects::handle(cmd, &cli.api).await,
        Commands::Tasks(cmd) => tasks::handle(cmd, &cli.api).await,
    };

    if let Err(e) = &result
        && let Some(err) = e.downcast_ref::<taskmaster_core::Error>()
        && err.is_session_expired()
    {
        output::error("Session expired. Run 'taskmaster auth login' to sign in again.");
    }

    result
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
