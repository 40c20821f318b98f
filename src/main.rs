use anyhow::Context;
use dotenv::dotenv;
use std::sync::Arc;
use todo_service::config::AppConfig;
use todo_service::{SharedData, build_router, logging, persistence};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    if dotenv().is_err() {
        println!("Running without a .env file.");
    }
    let config = AppConfig::from_env().context("loading configuration")?;
    logging::init_from_config(&config)?;

    let db_pool = persistence::connect_pool(&config.database_url, config.db_max_connections)?;
    let shared_data = Arc::new(SharedData {
        ext_cxn: persistence::ExternalConnectivity::new(db_pool),
    });
    let router = build_router(shared_data, &config.cors_origins);

    let listener = TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("binding to {}", config.bind_address))?;
    info!(address = %config.bind_address, "Starting server.");

    axum::serve(listener, router)
        .await
        .context("running the HTTP server")
}
