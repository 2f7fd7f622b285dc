use crate::error::{Error, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://gnews.io/api/v4";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 600;

#[derive(Debug, Clone)]
pub struct Config {
    pub gnews_api_key: Option<String>,
    pub gnews_base_url: String,
    pub cache_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let gnews_api_key = env::var("GNEWS_API_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let gnews_base_url = env::var("GNEWS_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let cache_ttl_secs = match env::var("NEWS_CACHE_TTL_SECS") {
            Ok(v) => v.parse().map_err(|_| {
                Error::Config(format!(
                    "NEWS_CACHE_TTL_SECS must be a number of seconds, got {:?}",
                    v
                ))
            })?,
            Err(_) => DEFAULT_CACHE_TTL_SECS,
        };

        Ok(Self {
            gnews_api_key,
            gnews_base_url,
            cache_ttl_secs,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gnews_api_key: None,
            gnews_base_url: DEFAULT_BASE_URL.to_string(),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub cache_ttl: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            cache_ttl: Duration::from_secs(config.cache_ttl_secs),
        }
    }
}
