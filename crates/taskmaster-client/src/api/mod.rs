//! Typed wrappers for the project, task and profile endpoints.
//!
//! These are `impl SessionManager` blocks: every call goes through the
//! authenticated path and shares its refresh handling.

mod profile;
mod projects;
mod tasks;

use taskmaster_core::error::InvalidInputError;
use taskmaster_core::Result;

/// Ids are interpolated into URL paths, so they must be a single segment
/// that survives dot-segment normalization.
fn path_id(id: &str) -> Result<&str> {
    if id.is_empty() || is_dot_segment(id) || id.contains(['/', '\\', '?', '#']) {
        return Err(InvalidInputError::Other {
            message: format!("invalid resource id: {:?}", id),
        }
        .into());
    }
    Ok(id)
}

/// `.` and `..`, including their percent-encoded spellings.
fn is_dot_segment(id: &str) -> bool {
    let decoded = id.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}
