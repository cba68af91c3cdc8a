//! Get task command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::ApiOptions;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Task id
    pub id: String,
}

pub async fn run(args: GetArgs, options: &ApiOptions) -> Result<()> {
    let session = session::require(options).await?;

    let task = session
        .manager
        .get_task(&args.id)
        .await
        .context("Failed to fetch task")?;

    output::json_pretty(&task)
}
