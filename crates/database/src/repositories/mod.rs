pub mod organization_role;
