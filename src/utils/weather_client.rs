use std::{fmt::Debug, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::models::weather::{OwCurrentResponse, WeatherRecord};

pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);
const UNITS: &str = "metric";
const LANG: &str = "ru";

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("city not found upstream (status {0})")]
    NotFound(u16),
    #[error("weather provider unavailable (status {0})")]
    Unavailable(u16),
    #[error("weather provider request timed out")]
    Timeout,
    #[error("weather provider request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("malformed weather provider payload: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for WeatherError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            WeatherError::Timeout
        } else {
            WeatherError::Transport(error)
        }
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherRecord, WeatherError>;
}

/// Current-weather client for the OpenWeatherMap API.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    http_client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(base_url: &str, api_key: String) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base_url, api_key, UPSTREAM_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: &str,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherRecord, WeatherError> {
        let res = self
            .http_client
            .get(format!("{}/data/2.5/weather", self.base_url))
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", UNITS),
                ("lang", LANG),
            ])
            .send()
            .await?;

        let status = res.status();
        if status.is_client_error() {
            return Err(WeatherError::NotFound(status.as_u16()));
        }
        if !status.is_success() {
            return Err(WeatherError::Unavailable(status.as_u16()));
        }

        let body = res.text().await?;
        let parsed: OwCurrentResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::Parse(e.to_string()))?;

        parsed
            .into_record()
            .ok_or_else(|| WeatherError::Parse("no weather condition in payload".to_string()))
    }
}
