//! Core traits for storage, the remote auth service and status observers.

mod auth;
mod status;
mod store;

pub use auth::AuthService;
pub use status::StatusStream;
pub use store::KeyValueStore;
