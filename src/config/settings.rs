//! Application settings loaded from environment variables.

use std::env;
use std::time::Duration;

use super::constants::{
    DEFAULT_DB_HOST, DEFAULT_DB_NAME, DEFAULT_DB_PASSWORD, DEFAULT_DB_PORT, DEFAULT_DB_SSL_MODE,
    DEFAULT_DB_USER, DEFAULT_ENVIRONMENT, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT,
};
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub environment: String,
    pub request_timeout: Duration,
    /// Allowed CORS origins; empty means permissive
    pub cors_allowed_origins: Vec<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("environment", &self.environment)
            .field("request_timeout", &self.request_timeout)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: compose_database_url(
                DEFAULT_DB_HOST,
                DEFAULT_DB_PORT,
                DEFAULT_DB_USER,
                DEFAULT_DB_PASSWORD,
                DEFAULT_DB_NAME,
                DEFAULT_DB_SSL_MODE,
            ),
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            environment: DEFAULT_ENVIRONMENT.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    ///
    /// `DATABASE_URL` wins when set; otherwise the URL is composed from the
    /// individual `DB_*` variables. An unparsable `DB_PORT` is an error.
    pub fn from_env() -> AppResult<Self> {
        if dotenvy::dotenv().is_err() {
            tracing::debug!("No .env file found, using process environment");
        }

        let database_url = match env::var("DATABASE_URL") {
            Ok(url) if !url.is_empty() => url,
            _ => {
                let port = match env::var("DB_PORT") {
                    Ok(raw) if !raw.is_empty() => raw
                        .parse::<u16>()
                        .map_err(|e| AppError::internal(format!("invalid DB_PORT: {}", e)))?,
                    _ => DEFAULT_DB_PORT,
                };
                compose_database_url(
                    &var_or("DB_HOST", DEFAULT_DB_HOST),
                    port,
                    &var_or("DB_USER", DEFAULT_DB_USER),
                    &var_or("DB_PASSWORD", DEFAULT_DB_PASSWORD),
                    &var_or("DB_NAME", DEFAULT_DB_NAME),
                    &var_or("DB_SSL_MODE", DEFAULT_DB_SSL_MODE),
                )
            }
        };

        Ok(Self {
            database_url,
            server_host: var_or("SERVER_HOST", DEFAULT_SERVER_HOST),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            environment: env::var("APP_ENV")
                .or_else(|_| env::var("ENV"))
                .unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string()),
            request_timeout: Duration::from_secs(
                env::var("REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or_default(),
        })
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Whether the application runs in a development environment.
    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case(DEFAULT_ENVIRONMENT)
    }
}

/// Read a variable, falling back to `default` when unset or empty.
fn var_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

fn compose_database_url(
    host: &str,
    port: u16,
    user: &str,
    password: &str,
    name: &str,
    ssl_mode: &str,
) -> String {
    format!(
        "postgres://{}:{}@{}:{}/{}?sslmode={}",
        user, password, host, port, name, ssl_mode
    )
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
