//! Durable storage adapters.

mod atomic;
mod file_storage;

pub use atomic::write_atomic;
pub use file_storage::FileStorage;
