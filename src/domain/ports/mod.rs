mod auth_port;
mod storage_port;

pub use auth_port::AuthPort;
pub use storage_port::StoragePort;
