//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use taskmaster_core::LoginDetails;

use crate::cli::ApiOptions;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long, env = "TASKMASTER_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(args: LoginArgs, options: &ApiOptions) -> Result<()> {
    let session = session::open(options).await?;

    eprintln!("{}", "Logging in...".dimmed());

    let user = session
        .manager
        .login(LoginDetails::new(args.email, args.password))
        .await
        .context("Failed to login")?;

    output::success("Logged in successfully");
    println!();
    output::field("Name", &user.name);
    output::field("Email", &user.email);
    output::field("API", session.manager.config().base_url().as_str());

    Ok(())
}
