use std::sync::Arc;

use axum::{middleware::from_fn_with_state, routing::get, Router};

use crate::{
    handlers::{middleware::rate_limit_middleware, weather::get_weather},
    utils::state::AppState,
};

/// The limiter keys on `ConnectInfo<SocketAddr>`, so the app must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()`; without it every request fails with 500.
pub fn weather_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/weather", get(get_weather))
        .route("/weather/", get(get_weather))
        .route_layer(from_fn_with_state(state, rate_limit_middleware))
}
