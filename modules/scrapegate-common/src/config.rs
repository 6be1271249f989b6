use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_APIFY_BASE_URL: &str = "https://api.apify.com/v2";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{key} must be {expected}, got {value:?}")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Apify
    pub apify_api_token: String,
    pub apify_base_url: String,

    // Web server
    pub host: String,
    pub port: u16,

    // Jobs
    pub job_workers: usize,
    pub job_time_limit: Duration,
    pub job_result_ttl: Duration,
}

impl Config {
    /// Load configuration from the process environment (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        config.log_keys();
        Ok(config)
    }

    /// Build a config with every optional setting at its default.
    pub fn for_token(token: impl Into<String>) -> Self {
        Self {
            apify_api_token: token.into(),
            apify_base_url: DEFAULT_APIFY_BASE_URL.to_string(),
            host: "0.0.0.0".to_string(),
            port: 8000,
            job_workers: 1,
            job_time_limit: Duration::from_secs(600),
            job_result_ttl: Duration::from_secs(3600),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let token = non_empty("APIFY_API_TOKEN")
            .or_else(|| non_empty("APIFY_API_KEY"))
            .ok_or(ConfigError::Missing("APIFY_API_TOKEN"))?;

        let mut config = Self::for_token(token);
        if let Some(url) = lookup("APIFY_BASE_URL") {
            config.apify_base_url = url;
        }
        if let Some(host) = lookup("API_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("API_PORT") {
            config.port = parse("API_PORT", "a port number", port)?;
        }
        if let Some(workers) = lookup("JOB_WORKERS") {
            let workers: usize = parse("JOB_WORKERS", "a positive integer", workers)?;
            if workers == 0 {
                return Err(ConfigError::Invalid {
                    key: "JOB_WORKERS",
                    expected: "a positive integer",
                    value: "0".to_string(),
                });
            }
            config.job_workers = workers;
        }
        if let Some(secs) = lookup("JOB_TIME_LIMIT_SECS") {
            config.job_time_limit =
                Duration::from_secs(parse("JOB_TIME_LIMIT_SECS", "a number of seconds", secs)?);
        }
        if let Some(secs) = lookup("JOB_RESULT_TTL_SECS") {
            config.job_result_ttl =
                Duration::from_secs(parse("JOB_RESULT_TTL_SECS", "a number of seconds", secs)?);
        }
        Ok(config)
    }

    fn log_keys(&self) {
        fn preview(val: &str) -> String {
            let n = val.chars().take(5).map(char::len_utf8).sum();
            format!("{}...({} chars)", &val[..n], val.len())
        }

        tracing::info!("Config loaded:");
        tracing::info!("  APIFY_API_TOKEN: {}", preview(&self.apify_api_token));
        tracing::info!("  APIFY_BASE_URL: {}", self.apify_base_url);
        tracing::info!("  JOB_WORKERS: {}", self.job_workers);
    }
}

fn parse<T: std::str::FromStr>(
    key: &'static str,
    expected: &'static str,
    value: String,
) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, expected, value })
}
