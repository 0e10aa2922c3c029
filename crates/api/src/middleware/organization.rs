use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use cb_models::OrgAuthResult;
use cb_tenant::{determine_org_access, TenantContext, TenantExtractor};
use std::sync::Arc;
use uuid::Uuid;

/// What a request does after its organization access is resolved
pub enum OrgAccess {
    Redirect(Response),
    Proceed {
        context: TenantContext,
        set_cookie: Option<String>,
    },
}

/// Turn a verdict into a redirect or a tenant context plus any cookie to set.
///
/// `had_selection_cookie` clears a stale selection on redirect.
pub fn apply_verdict(
    extractor: &TenantExtractor,
    org_list_path: &str,
    user_id: Uuid,
    verdict: &OrgAuthResult,
    had_selection_cookie: bool,
) -> Result<OrgAccess, ApiError> {
    let Some(context) = TenantContext::from_verdict(user_id, verdict) else {
        let mut response = Redirect::to(org_list_path).into_response();
        if had_selection_cookie {
            response
                .headers_mut()
                .append(header::SET_COOKIE, cookie_header(&extractor.clear_cookie())?);
        }
        return Ok(OrgAccess::Redirect(response));
    };

    let set_cookie = context
        .selection_changed
        .then(|| extractor.selection_cookie(&context.organization_id));

    Ok(OrgAccess::Proceed {
        context,
        set_cookie,
    })
}

/// Middleware resolving the active organization of an authenticated request.
///
/// Must run after `require_auth`.
pub async fn resolve_organization(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(|| ApiError::unauthorized("unauthenticated", "Authentication required"))?;

    let current_org_id = state.tenant.current_org_id(request.headers())?;
    let had_selection_cookie = state.tenant.has_selection_cookie(request.headers());

    let roles = state.roles.list_for_user(user.user_id).await?;
    let verdict = determine_org_access(&roles, current_org_id.as_deref());

    tracing::debug!(
        user_id = %user.user_id,
        current_org_id = current_org_id.as_deref().unwrap_or(""),
        action = verdict.action(),
        "Resolved organization access"
    );

    match apply_verdict(
        &state.tenant,
        &state.org_list_path,
        user.user_id,
        &verdict,
        had_selection_cookie,
    )? {
        OrgAccess::Redirect(response) => Ok(response),
        OrgAccess::Proceed {
            context,
            set_cookie,
        } => {
            request.extensions_mut().insert(context);
            request.extensions_mut().insert(verdict);

            let mut response = next.run(request).await;
            if let Some(cookie) = set_cookie {
                response
                    .headers_mut()
                    .append(header::SET_COOKIE, cookie_header(&cookie)?);
            }
            Ok(response)
        }
    }
}

pub(crate) fn cookie_header(cookie: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(cookie)
        .map_err(|e| ApiError::Internal(format!("Invalid Set-Cookie value: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn extractor() -> TenantExtractor {
        TenantExtractor::new("organizationId", 3600)
    }

    #[test]
    fn test_redirect_verdict() {
        let access = apply_verdict(
            &extractor(),
            "/organizations",
            Uuid::new_v4(),
            &OrgAuthResult::RedirectToOrgList,
            false,
        )
        .unwrap();

        let OrgAccess::Redirect(response) = access else {
            panic!("expected redirect");
        };
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/organizations");
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[test]
    fn test_redirect_clears_stale_selection() {
        let access = apply_verdict(
            &extractor(),
            "/organizations",
            Uuid::new_v4(),
            &OrgAuthResult::RedirectToOrgList,
            true,
        )
        .unwrap();

        let OrgAccess::Redirect(response) = access else {
            panic!("expected redirect");
        };
        assert_eq!(
            response.headers()[header::SET_COOKIE],
            "organizationId=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0"
        );
    }

    #[test]
    fn test_set_owner_org_persists_selection() {
        let user_id = Uuid::new_v4();
        let access = apply_verdict(
            &extractor(),
            "/organizations",
            user_id,
            &OrgAuthResult::SetOwnerOrg {
                organization_id: "learner-org".to_string(),
            },
            true,
        )
        .unwrap();

        let OrgAccess::Proceed {
            context,
            set_cookie,
        } = access
        else {
            panic!("expected proceed");
        };
        assert_eq!(context.user_id, user_id);
        assert_eq!(context.organization_id, "learner-org");
        assert_eq!(
            set_cookie.as_deref(),
            Some("organizationId=learner-org; Path=/; HttpOnly; SameSite=Lax; Max-Age=3600")
        );
    }

    #[test]
    fn test_use_current_org_sets_no_cookie() {
        let access = apply_verdict(
            &extractor(),
            "/organizations",
            Uuid::new_v4(),
            &OrgAuthResult::UseCurrentOrg {
                organization_id: "org-1".to_string(),
            },
            true,
        )
        .unwrap();

        let OrgAccess::Proceed {
            context,
            set_cookie,
        } = access
        else {
            panic!("expected proceed");
        };
        assert_eq!(context.organization_id, "org-1");
        assert!(!context.selection_changed);
        assert_eq!(set_cookie, None);
    }
}
