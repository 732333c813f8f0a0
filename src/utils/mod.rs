pub mod config;
pub mod rate_limiter;
pub mod state;
pub mod weather_cache;
pub mod weather_client;
