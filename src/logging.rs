use crate::app_env;
use crate::config::AppConfig;
use anyhow::Context;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use opentelemetry::trace::TracerProvider;
use opentelemetry::{KeyValue, global};
use opentelemetry_http::HeaderExtractor;
use opentelemetry_otlp::{MetricExporter, SpanExporter, WithExportConfig};
use opentelemetry_sdk::metrics::{PeriodicReader, SdkMeterProvider};
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::Tracer;
use opentelemetry_sdk::{Resource, runtime};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing::{Span, debug, debug_span, field, warn};
use tracing_opentelemetry::{MetricsLayer, OpenTelemetryLayer, OpenTelemetrySpanExt};
use tracing_subscriber::{EnvFilter, prelude::*, registry};

/// The name of the service as it should appear in OpenTelemetry collectors
const SERVICE_NAME: &str = "todo-service";

/// Struct containing OpenTelemetry primitives which export data to a tracing server
pub struct OtelExporters {
    pub tracer: Tracer,
    pub meter: SdkMeterProvider,
}

/// Attaches a tracing middleware layer to the given router. Each request gets a "request" span
/// which continues any W3C trace context passed in the request headers.
pub fn attach_tracing_http<T>(router: Router<T>) -> Router<T>
where
    T: Clone + Send + Sync + 'static,
{
    router.layer(
        ServiceBuilder::new().layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let req_span = debug_span!(
                        "request",
                        method = &request.method().as_str(),
                        path = request.uri().path(),
                        response_status = field::Empty,
                    );

                    req_span.set_parent(global::get_text_map_propagator(|propagator| {
                        propagator.extract(&HeaderExtractor(request.headers()))
                    }));

                    req_span
                })
                .on_response(
                    |response: &Response<Body>, latency: Duration, span: &Span| {
                        span.record("response_status", field::display(response.status()));
                        debug!(latency_ms = latency.as_millis() as u64, "request processing complete");
                    },
                ),
        ),
    )
}

/// Instantiates OpenTelemetry exporters which run in the background and send tracing/logging/metrics
/// data to an opentelemetry-compatible gRPC endpoint (typically http://localhost:4317 with a standard
/// sidecar setup). Must be called from within a tokio runtime.
pub fn init_exporters(
    otlp_traces_endpoint: &str,
    otlp_metrics_endpoint: &str,
) -> Result<OtelExporters, anyhow::Error> {
    let span_export = SpanExporter::builder()
        .with_tonic()
        .with_endpoint(otlp_traces_endpoint)
        .build()
        .context("building span exporter")?;
    let meter_export = MetricExporter::builder()
        .with_tonic()
        .with_endpoint(otlp_metrics_endpoint)
        .build()
        .context("building meter exporter")?;

    let metrics_reader = PeriodicReader::builder(meter_export, runtime::Tokio).build();

    let tracer = opentelemetry_sdk::trace::TracerProvider::builder()
        .with_batch_exporter(span_export, runtime::Tokio)
        .with_resource(Resource::new([KeyValue::new("service.name", SERVICE_NAME)]))
        .build()
        .tracer(SERVICE_NAME);
    let meter_provider = SdkMeterProvider::builder()
        .with_reader(metrics_reader)
        .with_resource(Resource::new([KeyValue::new("service.name", SERVICE_NAME)]))
        .build();

    Ok(OtelExporters {
        tracer,
        meter: meter_provider,
    })
}

/// Constructs a filter which uses [app_env::LOG_LEVEL] to configure per-module logging. Filters
/// to the "info" level by default.
pub fn init_env_filter() -> Result<EnvFilter, anyhow::Error> {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var(app_env::LOG_LEVEL)
        .from_env()
        .context("building the logging filter")
}

/// Sets up the global logging and tracing sinks. All logs and metrics at the "debug" level and above
/// will automatically be sent to OpenTelemetry sinks if [otel_exporters] is provided. [env_filter] is
/// applied specifically to the JSON logger printing to stdout.
pub fn setup_logging_and_tracing(env_filter: EnvFilter, otel_exporters: Option<OtelExporters>) {
    global::set_text_map_propagator(TraceContextPropagator::new());

    if let Some(exporters) = otel_exporters {
        registry()
            .with(LevelFilter::DEBUG)
            .with(OpenTelemetryLayer::new(exporters.tracer))
            .with(MetricsLayer::new(exporters.meter))
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_filter(env_filter),
            )
            .init();
    } else {
        registry()
            .with(LevelFilter::DEBUG)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_filter(env_filter),
            )
            .init();
    }
}

/// Wires up logging for the service based on its configuration. OpenTelemetry export only starts
/// when both export URLs are configured.
pub fn init_from_config(config: &AppConfig) -> Result<(), anyhow::Error> {
    let env_filter = init_env_filter()?;

    let otel_exporters = match (
        config.otel_span_export_url.as_deref(),
        config.otel_metric_export_url.as_deref(),
    ) {
        (Some(span_url), Some(metric_url)) => Some(init_exporters(span_url, metric_url)?),
        _ => None,
    };
    let exporting = otel_exporters.is_some();

    setup_logging_and_tracing(env_filter, otel_exporters);
    if !exporting {
        warn!(
            "{} and {} are not both set, OpenTelemetry export is disabled",
            app_env::OTEL_SPAN_EXPORT_URL,
            app_env::OTEL_METRIC_EXPORT_URL
        );
    }

    Ok(())
}
