//! HTTP transport for the TaskMaster API.

mod client;
pub(crate) mod endpoints;
mod response;

pub(crate) use client::duration_ms;
pub use client::HttpClient;
pub use response::ApiResponse;
