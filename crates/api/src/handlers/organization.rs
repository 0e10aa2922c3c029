use crate::error::ApiError;
use crate::middleware::{organization::cookie_header, AuthUser};
use crate::AppState;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use cb_models::{OrgAuthResult, OrganizationMembership, SelectOrganization};
use cb_tenant::TenantContext;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationListResponse {
    pub organizations: Vec<OrganizationMembership>,
    pub current_organization_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessResponse {
    pub verdict: OrgAuthResult,
    pub organization_id: String,
    pub selection_changed: bool,
}

/// List the organizations the user can switch to
pub async fn list_organizations(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    headers: HeaderMap,
) -> Result<Json<OrganizationListResponse>, ApiError> {
    let roles = state.roles.list_for_user(user.user_id).await?;
    let current_org_id = state.tenant.current_org_id(&headers)?;

    Ok(Json(OrganizationListResponse {
        organizations: OrganizationMembership::group(&roles),
        current_organization_id: current_org_id,
    }))
}

/// Switch the current organization
pub async fn select_organization(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<SelectOrganization>,
) -> Result<Response, ApiError> {
    request.validate()?;

    if !state
        .roles
        .has_active_role(user.user_id, &request.organization_id)
        .await?
    {
        tracing::warn!(
            user_id = %user.user_id,
            organization_id = %request.organization_id,
            "Rejected selection of organization without an active role"
        );
        return Err(ApiError::NotAMember(request.organization_id));
    }

    tracing::info!(
        user_id = %user.user_id,
        email = %user.email,
        organization_id = %request.organization_id,
        "Organization selected"
    );

    let cookie = cookie_header(&state.tenant.selection_cookie(&request.organization_id))?;
    Ok(([(header::SET_COOKIE, cookie)], Json(request)).into_response())
}

/// Forget the current organization
pub async fn clear_selection(
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let cookie = cookie_header(&state.tenant.clear_cookie())?;
    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]).into_response())
}

/// Resolved organization access for the current request
pub async fn current_access(
    Extension(context): Extension<TenantContext>,
    Extension(verdict): Extension<OrgAuthResult>,
) -> Json<AccessResponse> {
    Json(AccessResponse {
        verdict,
        organization_id: context.organization_id,
        selection_changed: context.selection_changed,
    })
}
