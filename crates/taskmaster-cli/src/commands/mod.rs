//! Subcommand implementations.

pub mod auth;
pub mod projects;
pub mod tasks;
