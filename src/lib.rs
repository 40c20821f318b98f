use axum::Router;
use axum::extract::State;
use std::sync::Arc;

pub mod api;
pub mod app_env;
pub mod config;
pub mod domain;
pub mod dto;
pub mod external_connections;
pub mod logging;
pub mod persistence;
pub mod routing_utils;

/// Application state shared between every request handler
pub struct SharedData {
    pub ext_cxn: persistence::ExternalConnectivity,
}

type AppState = State<Arc<SharedData>>;

/// Assembles the full HTTP application: the todo routes, API documentation, CORS policy
/// and request tracing
pub fn build_router(shared_data: Arc<SharedData>, cors_origins: &config::CorsOrigins) -> Router {
    let router = Router::new()
        .nest("/todos", api::todo::todo_routes())
        .merge(api::swagger_main::build_documentation())
        .layer(cors_origins.layer())
        .with_state(shared_data);

    logging::attach_tracing_http(router)
}
