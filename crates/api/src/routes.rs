use crate::handlers;
use crate::middleware;
use crate::AppState;
use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Routes that need an active organization
    let organization_scoped = Router::new()
        .route(
            "/api/organizations/access",
            get(handlers::organization::current_access),
        )
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::resolve_organization,
        ));

    let authenticated = Router::new()
        .route(
            "/api/organizations",
            get(handlers::organization::list_organizations),
        )
        .route(
            "/api/organizations/current",
            post(handlers::organization::select_organization)
                .delete(handlers::organization::clear_selection),
        )
        .merge(organization_scoped)
        .route_layer(from_fn_with_state(state.clone(), middleware::require_auth));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/health/ready", get(handlers::health::readiness_check))
        .merge(authenticated)
        .with_state(state)
}
