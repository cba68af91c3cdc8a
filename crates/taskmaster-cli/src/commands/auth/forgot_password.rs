//! Forgot password command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::ApiOptions;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct ForgotPasswordArgs {
    /// Account email
    #[arg(long)]
    pub email: String,
}

pub async fn run(args: ForgotPasswordArgs, options: &ApiOptions) -> Result<()> {
    let session = session::open(options).await?;

    session
        .manager
        .forgot_password(&args.email)
        .await
        .context("Failed to request password reset")?;

    output::success("If the account exists, a reset email is on its way");
    Ok(())
}
