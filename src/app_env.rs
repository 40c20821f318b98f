/// URL for accessing the PostrgeSQL database (should contain a schema name in the path)
pub const DB_URL: &str = "DATABASE_URL";
/// Upper bound on the number of pooled database connections
pub const DB_MAX_CONNECTIONS: &str = "DB_MAX_CONNECTIONS";
/// Socket address the HTTP server listens on, such as 0.0.0.0:8080
pub const BIND_ADDRESS: &str = "BIND_ADDRESS";
/// Comma separated list of origins allowed to make cross-origin requests, or "*" to allow any origin
pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
/// Log level configuration for the application. For formatting info, see [tracing_subscriber's documentation](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html)
pub const LOG_LEVEL: &str = "LOG_LEVEL";

/// OpenTelemetry span export URL. Should be http://localhost:4317 by default, as the service should
/// have an OpenTelemetry collector sidecar which directs metrics to the correct place
pub const OTEL_SPAN_EXPORT_URL: &str = "OTEL_SPAN_EXPORT_URL";
/// OpenTelemetry metrics export URL. Should be http://localhost:4317 by default, as the service should
/// have an OpenTelemetry collector sidecar which directs metrics to the correct place
pub const OTEL_METRIC_EXPORT_URL: &str = "OTEL_METRIC_EXPORT_URL";

/// URL for accessing the PostgreSQL database during integration tests (should not contain a schema name in the path)
pub const TEST_DB_URL: &str = "TEST_DB_URL";
