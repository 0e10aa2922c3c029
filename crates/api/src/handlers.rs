pub mod health;
pub mod organization;
