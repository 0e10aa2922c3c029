use cb_database::DatabaseConfig;
use ::config::{ConfigError, Environment};
use serde::Deserialize;
use std::time::Duration;

/// Service configuration, read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub database_min_connections: u32,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    /// Cookie persisting the current organization selection
    pub org_cookie_name: String,
    pub org_cookie_max_age_secs: i64,
    /// Where users without a usable organization are sent
    pub org_list_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::default())
    }

    fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        let defaults = DatabaseConfig::default();

        ::config::Config::builder()
            .set_default("server_host", "0.0.0.0")?
            .set_default("server_port", 3000)?
            .set_default("database_url", defaults.url)?
            .set_default("database_max_connections", i64::from(defaults.max_connections))?
            .set_default("database_min_connections", i64::from(defaults.min_connections))?
            .set_default("jwt_expiration_hours", 1)?
            .set_default("org_cookie_name", "organizationId")?
            .set_default("org_cookie_max_age_secs", 60 * 60 * 24 * 365)?
            .set_default("org_list_path", "/organizations")?
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn database(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database_url.clone(),
            max_connections: self.database_max_connections,
            min_connections: self.database_min_connections,
            connect_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(600),
        }
    }
}
