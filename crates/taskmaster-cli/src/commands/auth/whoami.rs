//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::ApiOptions;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Ask the server instead of showing the stored profile
    #[arg(long)]
    pub remote: bool,
}

pub async fn run(args: WhoamiArgs, options: &ApiOptions) -> Result<()> {
    let session = session::require(options).await?;

    let user = if args.remote {
        session
            .manager
            .fetch_profile()
            .await
            .context("Failed to fetch profile")?
    } else {
        session.manager.current_user().context(session::NO_SESSION)?
    };

    output::profile(&user);
    output::field("API", session.manager.config().base_url().as_str());
    if let Some(saved_at) = session.saved_at() {
        output::field("Saved", &saved_at);
    }

    Ok(())
}
