//! taskmaster-store - Key-value storage backends for persisted sessions.

mod file;
mod memory;

pub use file::{FileStore, StoredEntry};
pub use memory::MemoryStore;
