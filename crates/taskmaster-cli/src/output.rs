//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use taskmaster_core::UserProfile;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print the fields of a user profile.
pub fn profile(user: &UserProfile) {
    field("Name", &user.name);
    field("Email", &user.email);
    field("ID", &user.id);
    field("Role", &user.role);
    if let Some(avatar) = &user.avatar {
        field("Avatar", avatar);
    }
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print each item as one JSON line, or pretty-printed.
pub fn json_list<T: Serialize>(items: &[T], pretty: bool) -> Result<()> {
    for item in items {
        if pretty {
            json_pretty(item)?;
        } else {
            json(item)?;
        }
    }
    Ok(())
}
