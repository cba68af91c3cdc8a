//! taskmaster-core - Core types and traits for the taskmaster session toolkit.

pub mod credentials;
pub mod error;
pub mod models;
pub mod profile;
pub mod status;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::{Credentials, LoginDetails, Registration};
pub use error::{Error, ErrorKind};
pub use profile::UserProfile;
pub use status::{AuthPhase, AuthStatus};
pub use tokens::{AccessToken, RefreshToken, TokenPair};
pub use traits::{AuthService, KeyValueStore, StatusStream};
pub use types::ApiUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
