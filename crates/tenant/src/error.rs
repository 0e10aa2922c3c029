use thiserror::Error;

pub type Result<T> = std::result::Result<T, TenantError>;

#[derive(Debug, Error)]
pub enum TenantError {
    #[error("Invalid organization selection: {0}")]
    InvalidSelection(String),
}
