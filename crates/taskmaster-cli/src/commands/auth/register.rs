//! Register command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use taskmaster_core::Registration;

use crate::cli::ApiOptions;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long, env = "TASKMASTER_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(args: RegisterArgs, options: &ApiOptions) -> Result<()> {
    let session = session::open(options).await?;

    eprintln!("{}", "Creating account...".dimmed());

    let user = session
        .manager
        .register(Registration::new(args.name, args.email, args.password))
        .await
        .context("Failed to register")?;

    output::success("Account created");
    println!();
    output::profile(&user);

    Ok(())
}
