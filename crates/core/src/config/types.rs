use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub trips: TripApiConfig,
    #[serde(default)]
    pub aggregator: AggregatorConfig,
    #[serde(default)]
    pub filters: FiltersConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote trip/hotel API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TripApiConfig {
    /// API base URL (e.g., "https://api.example.com/v1")
    pub base_url: String,
    /// Optional bearer token sent with every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Request timeout in seconds (default: 15)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_timeout() -> u32 {
    15
}

/// Fan-out and paging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AggregatorConfig {
    /// Page size used when the caller does not provide one.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    /// Upper bound applied to caller-provided page sizes.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
    /// Floor for the per-source slice when several kinds are requested.
    #[serde(default = "default_min_per_source")]
    pub min_per_source: u32,
    /// Give up on the trip source after this many milliseconds.
    /// A timeout is handled exactly like a trip source failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_timeout_ms: Option<u64>,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            min_per_source: default_min_per_source(),
            trip_timeout_ms: None,
        }
    }
}

fn default_page_size() -> u32 {
    12
}

fn default_max_page_size() -> u32 {
    60
}

fn default_min_per_source() -> u32 {
    4
}

/// Filter store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FiltersConfig {
    /// Storage namespace for this store's keys.
    #[serde(default = "default_domain")]
    pub domain: String,
    /// Maximum number of named presets kept.
    #[serde(default = "default_preset_cap")]
    pub preset_cap: usize,
    /// Currency used when no country is selected.
    #[serde(default = "default_currency")]
    pub default_currency: String,
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            domain: default_domain(),
            preset_cap: default_preset_cap(),
            default_currency: default_currency(),
        }
    }
}

fn default_domain() -> String {
    "trips".to_string()
}

fn default_preset_cap() -> usize {
    20
}

fn default_currency() -> String {
    "XOF".to_string()
}

/// Key-value storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("marketplace.db")
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}
