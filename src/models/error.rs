use axum::http::{header, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;
use serde_json::Value;

use crate::utils::weather_client::WeatherError;

#[derive(Debug)]
pub struct Error {
    pub code: StatusCode,
    pub body: Json<Value>,
    pub retry_after_secs: Option<i64>,
}

impl Error {
    pub fn new(code: StatusCode, message: &str) -> Self {
        Self {
            code,
            body: Json(json!({"error": message})),
            retry_after_secs: None,
        }
    }

    pub fn city_required() -> Self {
        Self::new(StatusCode::BAD_REQUEST, "City parameter is required")
    }

    pub fn too_many_requests(retry_after_secs: i64) -> Self {
        Self {
            retry_after_secs: Some(retry_after_secs.max(1)),
            ..Self::new(StatusCode::TOO_MANY_REQUESTS, "Too many requests")
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let mut response = (self.code, self.body).into_response();
        if let Some(secs) = self.retry_after_secs {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}

impl From<WeatherError> for Error {
    fn from(error: WeatherError) -> Self {
        match error {
            WeatherError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "City not found"),
            WeatherError::Timeout => {
                Self::new(StatusCode::GATEWAY_TIMEOUT, "Weather service timed out")
            }
            WeatherError::Unavailable(_) | WeatherError::Transport(_) | WeatherError::Parse(_) => {
                Self::new(StatusCode::BAD_GATEWAY, "Weather service unavailable")
            }
        }
    }
}
