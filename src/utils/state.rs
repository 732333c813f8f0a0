use std::sync::Arc;

use chrono::Duration;

use crate::utils::{
    config::Config,
    rate_limiter::RateLimiter,
    weather_cache::WeatherCache,
    weather_client::{OpenWeatherClient, WeatherProvider},
};

#[derive(Clone)]
pub struct AppState {
    pub weather_client: Arc<dyn WeatherProvider>,
    pub weather_cache: WeatherCache,
    pub rate_limiter: RateLimiter,
}

impl AppState {
    pub fn new(
        weather_client: Arc<dyn WeatherProvider>,
        weather_cache: WeatherCache,
        rate_limiter: RateLimiter,
    ) -> Self {
        AppState {
            weather_client,
            weather_cache,
            rate_limiter,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let weather_client = OpenWeatherClient::new(
            &config.openweather_base_url,
            config.openweather_api_key.clone(),
        )?;

        Ok(AppState::new(
            Arc::new(weather_client),
            WeatherCache::new(config.cache_ttl),
            RateLimiter::new(config.rate_limit_per_hour, Duration::hours(1)),
        ))
    }
}
