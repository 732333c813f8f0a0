use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::IntoResponse,
};
use std::{net::SocketAddr, sync::Arc};

use crate::{
    models::error::Error,
    utils::{rate_limiter::RateDecision, state::AppState},
};

/// Counts the request against the peer address before any handler work.
/// Forwarded-for headers are ignored; behind a proxy every caller shares the proxy's quota.
pub async fn rate_limit_middleware(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Result<impl IntoResponse, Error> {
    match state.rate_limiter.allow(addr.ip()) {
        RateDecision::Allowed { remaining } => {
            tracing::debug!(client = %addr.ip(), remaining, "Request admitted");
            Ok(next.run(req).await)
        }
        RateDecision::Rejected { retry_after } => {
            tracing::warn!(client = %addr.ip(), "Rejected request over rate limit");
            Err(Error::too_many_requests(retry_after.num_seconds()))
        }
    }
}
