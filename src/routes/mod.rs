pub mod weather;

use axum::{response::IntoResponse, routing::get, Json, Router};
use chrono::Utc;
use http::StatusCode;
use serde_json::json;
use std::{error::Error, sync::Arc, time::Duration};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, Level};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt, Registry};

use crate::{
    routes::weather::weather_routes,
    utils::{config::Config, state::AppState},
};

const SWEEP_INTERVAL: Duration = Duration::from_secs(300);

pub fn init_tracing(log_level: &str) {
    let level = match log_level {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    };

    let filter = filter::Targets::new()
        .with_target("tower_http::trace::on_response", Level::TRACE)
        .with_target("tower_http::trace::on_request", Level::TRACE)
        .with_target("tower_http::trace::make_span", Level::DEBUG)
        .with_target("axum::rejection", Level::TRACE)
        .with_target(env!("CARGO_CRATE_NAME"), level)
        .with_default(Level::INFO);

    let tracing_layer = tracing_subscriber::fmt::layer();

    Registry::default().with(tracing_layer).with(filter).init();
}

pub async fn make_app(config: &Config) -> Result<Router, Box<dyn Error>> {
    info!("Initializing application...");
    let state = Arc::new(AppState::from_config(config)?);
    info!(
        upstream = %config.openweather_base_url,
        cache_ttl_secs = config.cache_ttl.num_seconds(),
        rate_limit_per_hour = config.rate_limit_per_hour,
        "Weather client initialized successfully"
    );

    spawn_sweeper(state.clone());

    let app = build_router(state);
    info!("Application initialized successfully");

    Ok(app)
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health_check))
        .merge(weather_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Periodically drops expired cache entries and idle rate limit counters.
fn spawn_sweeper(state: Arc<AppState>) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let now = Utc::now();
            let evicted = state.weather_cache.purge_expired_at(now);
            let idle = state.rate_limiter.purge_idle_at(now);
            debug!(
                evicted,
                idle,
                cached = state.weather_cache.len(),
                clients = state.rate_limiter.tracked_clients(),
                "Swept expired cache entries and idle clients"
            );
        }
    });
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"message": "ok"}))).into_response()
}
