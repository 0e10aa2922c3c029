// Organization access resolution and tenant selection plumbing.
// The resolver is pure; extraction and cookie rendering feed it and act on it.

pub mod context;
pub mod error;
pub mod extractor;
pub mod resolver;

pub use context::TenantContext;
pub use error::{Result, TenantError};
pub use extractor::{TenantExtractor, ORGANIZATION_HEADER};
pub use resolver::determine_org_access;
