use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cb_auth::AuthError;
use cb_database::DatabaseError;
use cb_tenant::TenantError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: &str, message: &str) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{1}")]
    Unauthorized(&'static str, String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Tenant(#[from] TenantError),

    #[error("Not a member of organization {0}")]
    NotAMember(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn unauthorized(code: &'static str, message: &str) -> Self {
        ApiError::Unauthorized(code, message.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Unauthorized(code, message) => (StatusCode::UNAUTHORIZED, *code, message.clone()),
            ApiError::Auth(AuthError::TokenExpired) => {
                (StatusCode::UNAUTHORIZED, "token_expired", self.to_string())
            }
            ApiError::Auth(_) => (StatusCode::UNAUTHORIZED, "invalid_token", self.to_string()),
            ApiError::Tenant(_) => (
                StatusCode::BAD_REQUEST,
                "invalid_organization_selection",
                self.to_string(),
            ),
            ApiError::NotAMember(_) => (StatusCode::FORBIDDEN, "not_a_member", self.to_string()),
            ApiError::Validation(_) => {
                (StatusCode::BAD_REQUEST, "validation_error", self.to_string())
            }
            ApiError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Database error".to_string(),
                )
            }
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(code, &message))).into_response()
    }
}
