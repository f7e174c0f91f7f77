//! Domain entity definitions.

mod credentials;
mod identifier_set;
mod user;

pub use credentials::{Credentials, Registration};
pub use identifier_set::IdentifierSet;
pub use user::{IdentityPayload, Role, SessionUser};
