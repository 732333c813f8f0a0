use std::net::SocketAddr;

use chrono::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_CACHE_TTL_SECS: i64 = 3600;
pub const MAX_CACHE_TTL_SECS: i64 = 30 * 24 * 3600;
pub const DEFAULT_RATE_LIMIT_PER_HOUR: u32 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),
    #[error("{name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub openweather_api_key: String,
    pub openweather_base_url: String,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub cache_ttl: Duration,
    pub rate_limit_per_hour: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let openweather_api_key = lookup("OPENWEATHERMAP_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::Missing("OPENWEATHERMAP_API_KEY"))?;

        let openweather_base_url =
            lookup("OPENWEATHERMAP_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let bind_addr: SocketAddr = parse_or(&lookup, "BIND_ADDR", || {
            DEFAULT_BIND_ADDR.parse().map_err(|_| ConfigError::Invalid {
                name: "BIND_ADDR",
                value: DEFAULT_BIND_ADDR.to_string(),
            })
        })?;

        let log_level = lookup("LOG_LEVEL")
            .unwrap_or_else(|| "info".to_string())
            .to_lowercase();

        let cache_ttl_secs: i64 = parse_or(&lookup, "CACHE_TTL_SECS", || Ok(DEFAULT_CACHE_TTL_SECS))?;
        let cache_ttl = Some(cache_ttl_secs)
            .filter(|secs| (1..=MAX_CACHE_TTL_SECS).contains(secs))
            .and_then(Duration::try_seconds)
            .ok_or_else(|| ConfigError::Invalid {
                name: "CACHE_TTL_SECS",
                value: cache_ttl_secs.to_string(),
            })?;

        let rate_limit_per_hour: u32 =
            parse_or(&lookup, "RATE_LIMIT_PER_HOUR", || Ok(DEFAULT_RATE_LIMIT_PER_HOUR))?;
        if rate_limit_per_hour == 0 {
            return Err(ConfigError::Invalid {
                name: "RATE_LIMIT_PER_HOUR",
                value: "0".to_string(),
            });
        }

        Ok(Config {
            openweather_api_key,
            openweather_base_url,
            bind_addr,
            log_level,
            cache_ttl,
            rate_limit_per_hour,
        })
    }
}

fn parse_or<F, T>(
    lookup: &F,
    name: &'static str,
    default: impl FnOnce() -> Result<T, ConfigError>,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => default(),
    }
}
