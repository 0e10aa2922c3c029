// Course Builder organization API
// Resolves which organization a signed-in user operates in

mod config;
mod error;
mod handlers;
mod middleware;
mod routes;

use anyhow::Context;
use cb_auth::JwtService;
use cb_database::{Database, OrganizationRoleRepository};
use cb_tenant::TenantExtractor;
use crate::config::Config;
use dotenvy::dotenv;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub struct AppState {
    pub db: Database,
    pub roles: OrganizationRoleRepository,
    pub jwt: JwtService,
    pub tenant: TenantExtractor,
    pub org_list_path: String,
}

impl AppState {
    pub fn new(config: &Config, db: Database) -> Self {
        Self {
            roles: OrganizationRoleRepository::new(db.pool().clone()),
            db,
            jwt: JwtService::with_expiration(&config.jwt_secret, config.jwt_expiration_hours),
            tenant: TenantExtractor::new(
                config.org_cookie_name.clone(),
                config.org_cookie_max_age_secs,
            ),
            org_list_path: config.org_list_path.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,cb_api=debug,tower_http=debug".to_string()),
        )
        .init();

    tracing::info!("Starting Course Builder organization API");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Server: {}:{}", config.server_host, config.server_port);

    tracing::info!("Connecting to database...");
    let database = Database::new(config.database())
        .await
        .context("Failed to connect to database")?;
    database.ping().await.context("Database ping failed")?;
    tracing::info!("Database connected");

    let state = Arc::new(AppState::new(&config, database.clone()));

    let app = routes::create_router(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    tracing::info!("Routes configured:");
    tracing::info!("   GET    /health");
    tracing::info!("   GET    /health/ready");
    tracing::info!("   GET    /api/organizations");
    tracing::info!("   POST   /api/organizations/current");
    tracing::info!("   DELETE /api/organizations/current");
    tracing::info!("   GET    /api/organizations/access");

    let addr = format!("{}:{}", config.server_host, config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Server ready at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    database.close().await;
    tracing::info!("Shut down cleanly");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
