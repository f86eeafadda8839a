use dotenv::dotenv;
use std::env;
use std::time::Duration;

use crate::error::ConfigError;

pub const PUBLIC_BASE_URL: &str = "https://api.coingecko.com/api/v3";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub coingecko_base_url: String,
    pub coingecko_api_key: Option<String>,
    pub host: String,
    pub port: u16,
    pub cache_ttl: Duration,
    pub request_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            coingecko_base_url: PUBLIC_BASE_URL.to_string(),
            coingecko_api_key: None,
            host: "0.0.0.0".to_string(),
            port: 3000,
            cache_ttl: Duration::from_secs(60),
            request_timeout: Duration::from_secs(10),
        }
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigError::Invalid { key, value })
}

impl Settings {
    /// Reads `.env` (if any) and then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup. Unset or blank keys keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut settings = Settings::default();

        if let Some(base_url) = get("COINGECKO_BASE_URL") {
            settings.coingecko_base_url = base_url.trim_end_matches('/').to_string();
        }
        settings.coingecko_api_key = get("COINGECKO_API_KEY");
        if let Some(host) = get("HOST") {
            settings.host = host;
        }
        if let Some(port) = get("PORT") {
            settings.port = parse_number("PORT", port)?;
        }
        if let Some(ttl) = get("CACHE_TTL_SECS") {
            settings.cache_ttl = Duration::from_secs(parse_number("CACHE_TTL_SECS", ttl)?);
        }
        if let Some(timeout) = get("REQUEST_TIMEOUT_SECS") {
            settings.request_timeout =
                Duration::from_secs(parse_number("REQUEST_TIMEOUT_SECS", timeout)?);
        }

        Ok(settings)
    }
}
