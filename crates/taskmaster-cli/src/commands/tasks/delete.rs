//! Delete task command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::ApiOptions;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Task id
    pub id: String,
}

pub async fn run(args: DeleteArgs, options: &ApiOptions) -> Result<()> {
    let session = session::require(options).await?;

    session
        .manager
        .delete_task(&args.id)
        .await
        .context("Failed to delete task")?;

    output::success(&format!("Deleted task {}", args.id));
    Ok(())
}
