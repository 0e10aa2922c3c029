pub mod auth;
pub mod organization;

pub use auth::{require_auth, AuthUser};
pub use organization::resolve_organization;
