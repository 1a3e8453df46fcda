//! Pipeline configuration from environment variables

use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_REGISTRY_URL: &str = "https://registry.modelcontextprotocol.io/v0/servers";

/// Configuration shared by the collect, rollup and export binaries
///
/// Loaded from environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct TrendsConfig {
    /// Paginated server listing endpoint
    pub registry_url: String,

    /// Root directory of the series store
    pub data_dir: PathBuf,

    /// Per-request HTTP timeout
    pub request_timeout: Duration,

    /// Attempts after the first failed page request
    pub max_retries: u32,
    pub retry_initial_delay: Duration,
    pub retry_max_delay: Duration,

    /// Surface malformed rows as errors instead of skipping them
    pub strict_reads: bool,

    /// Where `export_dashboard` writes the JSON document
    pub dashboard_output_path: PathBuf,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue(msg) => write!(f, "Invalid configuration value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl TrendsConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `REGISTRY_URL` (default: registry.modelcontextprotocol.io servers listing)
    /// - `TRENDS_DATA_DIR` (default: data)
    /// - `REQUEST_TIMEOUT_SECS` (default: 30)
    /// - `FETCH_MAX_RETRIES` (default: 3)
    /// - `FETCH_RETRY_INITIAL_MS` (default: 500)
    /// - `FETCH_RETRY_MAX_MS` (default: 10000)
    /// - `STRICT_READS` (default: false)
    /// - `DASHBOARD_OUTPUT_PATH` (default: <data dir>/static-data.json)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let registry_url = lookup("REGISTRY_URL").unwrap_or_else(|| DEFAULT_REGISTRY_URL.to_string());

        if !registry_url.starts_with("http://") && !registry_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue(
                "REGISTRY_URL must start with http:// or https://".to_string(),
            ));
        }

        let data_dir = PathBuf::from(lookup("TRENDS_DATA_DIR").unwrap_or_else(|| "data".to_string()));

        let dashboard_output_path = lookup("DASHBOARD_OUTPUT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("static-data.json"));

        Ok(Self {
            registry_url,
            request_timeout: Duration::from_secs(parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)),
            max_retries: parse_or(&lookup, "FETCH_MAX_RETRIES", 3),
            retry_initial_delay: Duration::from_millis(parse_or(&lookup, "FETCH_RETRY_INITIAL_MS", 500)),
            retry_max_delay: Duration::from_millis(parse_or(&lookup, "FETCH_RETRY_MAX_MS", 10_000)),
            strict_reads: parse_or(&lookup, "STRICT_READS", false),
            data_dir,
            dashboard_output_path,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + std::fmt::Debug,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Invalid {} '{}', defaulting to {:?}", key, raw, default);
            default
        }),
        None => default,
    }
}
