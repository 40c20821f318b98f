use crate::app_env;
use axum::http::HeaderValue;
use std::env;
use std::net::SocketAddr;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("the {0} environment variable must be set")]
    Missing(&'static str),
    #[error("the {name} environment variable had an invalid value \"{value}\"")]
    Invalid { name: &'static str, value: String },
}

/// Which origins may make cross-origin requests to the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

impl CorsOrigins {
    /// Parses the value of [app_env::CORS_ALLOWED_ORIGINS]. "*" (or an empty value) allows any origin,
    /// otherwise the value is split on commas.
    pub fn parse(raw: &str) -> Result<CorsOrigins, ConfigError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "*" {
            return Ok(CorsOrigins::Any);
        }

        let origins: Vec<String> = trimmed
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect();

        for origin in &origins {
            if origin == "*" || HeaderValue::from_str(origin).is_err() {
                return Err(ConfigError::Invalid {
                    name: app_env::CORS_ALLOWED_ORIGINS,
                    value: raw.to_owned(),
                });
            }
        }

        Ok(CorsOrigins::List(origins))
    }

    /// Builds the CORS middleware for this origin policy
    pub fn layer(&self) -> CorsLayer {
        let allow_origin = match self {
            Self::Any => AllowOrigin::from(Any),
            Self::List(origins) => AllowOrigin::list(
                origins
                    .iter()
                    .filter_map(|origin| HeaderValue::from_str(origin).ok()),
            ),
        };

        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Runtime settings for the service, sourced from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub bind_address: SocketAddr,
    pub cors_origins: CorsOrigins,
    pub otel_span_export_url: Option<String>,
    pub otel_metric_export_url: Option<String>,
}

impl AppConfig {
    /// Reads the configuration from the process environment. Call [dotenv::dotenv] first
    /// if values should also come from a .env file.
    pub fn from_env() -> Result<AppConfig, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<AppConfig, ConfigError> {
        let database_url = lookup(app_env::DB_URL).ok_or(ConfigError::Missing(app_env::DB_URL))?;

        let db_max_connections = match lookup(app_env::DB_MAX_CONNECTIONS) {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|max| *max > 0)
                .ok_or(ConfigError::Invalid {
                    name: app_env::DB_MAX_CONNECTIONS,
                    value: raw,
                })?,
        };

        let raw_bind_address =
            lookup(app_env::BIND_ADDRESS).unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_owned());
        let bind_address = raw_bind_address
            .trim()
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::Invalid {
                name: app_env::BIND_ADDRESS,
                value: raw_bind_address.clone(),
            })?;

        let cors_origins = match lookup(app_env::CORS_ALLOWED_ORIGINS) {
            None => CorsOrigins::Any,
            Some(raw) => CorsOrigins::parse(&raw)?,
        };

        Ok(AppConfig {
            database_url,
            db_max_connections,
            bind_address,
            cors_origins,
            otel_span_export_url: lookup(app_env::OTEL_SPAN_EXPORT_URL),
            otel_metric_export_url: lookup(app_env::OTEL_METRIC_EXPORT_URL),
        })
    }
}
