//! Auth subcommand implementations.

mod forgot_password;
mod login;
mod logout;
mod refresh_token;
mod register;
mod whoami;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::ApiOptions;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Sign in with email and password
    Login(login::LoginArgs),

    /// Create an account and sign in
    Register(register::RegisterArgs),

    /// Sign out and remove the stored session
    Logout(logout::LogoutArgs),

    /// Display the signed-in user
    Whoami(whoami::WhoamiArgs),

    /// Refresh the session tokens
    RefreshToken(refresh_token::RefreshTokenArgs),

    /// Request a password reset email
    ForgotPassword(forgot_password::ForgotPasswordArgs),
}

pub async fn handle(cmd: AuthCommand, options: &ApiOptions) -> Result<()> {
    match cmd.command {
        AuthSubcommand::Login(args) => login::run(args, options).await,
        AuthSubcommand::Register(args) => register::run(args, options).await,
        AuthSubcommand::Logout(args) => logout::run(args, options).await,
        AuthSubcommand::Whoami(args) => whoami::run(args, options).await,
        AuthSubcommand::RefreshToken(args) => refresh_token::run(args, options).await,
        AuthSubcommand::ForgotPassword(args) => forgot_password::run(args, options).await,
    }
}
