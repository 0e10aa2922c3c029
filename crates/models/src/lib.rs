// Core modules
pub mod access;
pub mod organization;
pub mod organization_role;

// Re-export commonly used types
pub use access::OrgAuthResult;
pub use organization::{OrganizationMembership, SelectOrganization};
pub use organization_role::{OrganizationRole, RoleName};
