//! Use case implementations.

mod bootstrap_session_use_case;
mod login_use_case;

pub use bootstrap_session_use_case::{BootstrapSessionUseCase, DEFAULT_SESSION_TIMEOUT};
pub use login_use_case::LoginUseCase;
