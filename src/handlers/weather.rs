use std::sync::Arc;

use crate::{
    models::{
        error::Error,
        weather::{WeatherQuery, WeatherRecord},
    },
    utils::state::AppState,
};
use axum::{
    extract::{Query, State},
    Json,
};
use tracing::{info, warn};

pub async fn get_weather(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WeatherQuery>,
) -> Result<Json<WeatherRecord>, Error> {
    let city = params.city.as_deref().map(str::trim).unwrap_or_default();
    if city.is_empty() {
        return Err(Error::city_required());
    }

    if let Some(cached) = state.weather_cache.get(city) {
        info!(city, "Weather served from cache");
        return Ok(Json(cached));
    }

    let record = state
        .weather_client
        .fetch_weather(city)
        .await
        .map_err(|e| {
            warn!(city, error = %e, "Weather provider request failed");
            Error::from(e)
        })?;

    state.weather_cache.set(city, record.clone());
    info!(city, "Weather fetched from provider and cached");

    Ok(Json(record))
}
