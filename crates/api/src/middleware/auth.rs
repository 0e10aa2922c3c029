use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use cb_auth::Claims;
use std::sync::Arc;
use uuid::Uuid;

/// Authenticated user context
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
}

impl TryFrom<Claims> for AuthUser {
    type Error = ApiError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: claims.user_id()?,
            email: claims.email,
        })
    }
}

/// Extract the JWT from the Authorization header
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| {
            ApiError::unauthorized("missing_auth_header", "Authorization header is required")
        })?
        .to_str()
        .map_err(|_| {
            ApiError::unauthorized("invalid_auth_header", "Invalid Authorization header format")
        })?;

    auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::unauthorized(
            "invalid_auth_scheme",
            "Authorization header must use Bearer scheme",
        )
    })
}

/// Middleware to require authentication
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(request.headers())?;
    let claims = state.jwt.validate_access_token(token).map_err(|e| {
        tracing::warn!("Token validation failed: {}", e);
        e
    })?;
    let user = AuthUser::try_from(claims)?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
