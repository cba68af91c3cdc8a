//! Refresh token command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::cli::ApiOptions;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct RefreshTokenArgs {}

pub async fn run(_args: RefreshTokenArgs, options: &ApiOptions) -> Result<()> {
    let session = session::require(options).await?;

    eprintln!("{}", "Refreshing session...".dimmed());

    // Rotated tokens are persisted by the manager.
    session
        .manager
        .refresh()
        .await
        .context("Failed to refresh session")?;

    output::success("Session refreshed successfully");
    if let Some(user) = session.manager.current_user() {
        output::field("Email", &user.email);
    }

    Ok(())
}
