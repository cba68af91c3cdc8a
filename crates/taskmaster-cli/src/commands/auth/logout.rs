//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::ApiOptions;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, options: &ApiOptions) -> Result<()> {
    let session = session::open(options).await?;

    if !session.manager.is_authenticated() {
        output::success("Not logged in");
        return Ok(());
    }

    session
        .manager
        .logout()
        .await
        .context("Failed to remove stored session")?;

    output::success("Logged out");
    Ok(())
}
