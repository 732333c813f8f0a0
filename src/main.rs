mod handlers;
mod models;
mod routes;
mod utils;
use std::{error::Error, net::SocketAddr};

use routes::{init_tracing, make_app};
use tokio::net::TcpListener;
use tracing::info;
use utils::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    let config = Config::from_env()?;
    init_tracing(&config.log_level);
    info!("Configuration loaded successfully");

    let app = make_app(&config).await?;

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("Listening on http://{}", config.bind_addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
