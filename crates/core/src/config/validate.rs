use super::{types::Config, ConfigError};
use crate::defaults::is_known_currency;

/// Validate configuration
/// Currently validates:
/// - Trip API base URL is not empty
/// - Trip API timeout is positive
/// - Page sizes are positive and consistent
/// - Preset cap is positive
/// - Default currency is one of the known currencies
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.trips.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "trips.base_url cannot be empty".to_string(),
        ));
    }

    if config.trips.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "trips.timeout_secs cannot be 0".to_string(),
        ));
    }

    let agg = &config.aggregator;
    if agg.default_page_size == 0 {
        return Err(ConfigError::ValidationError(
            "aggregator.default_page_size cannot be 0".to_string(),
        ));
    }
    if agg.min_per_source == 0 {
        return Err(ConfigError::ValidationError(
            "aggregator.min_per_source cannot be 0".to_string(),
        ));
    }
    if agg.max_page_size < agg.default_page_size {
        return Err(ConfigError::ValidationError(format!(
            "aggregator.max_page_size ({}) is below default_page_size ({})",
            agg.max_page_size, agg.default_page_size
        )));
    }

    if config.filters.preset_cap == 0 {
        return Err(ConfigError::ValidationError(
            "filters.preset_cap cannot be 0".to_string(),
        ));
    }
    if !is_known_currency(&config.filters.default_currency) {
        return Err(ConfigError::ValidationError(format!(
            "filters.default_currency '{}' is not a known currency",
            config.filters.default_currency
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        AggregatorConfig, FiltersConfig, LoggingConfig, StorageConfig, TripApiConfig,
    };

    fn valid_config() -> Config {
        Config {
            trips: TripApiConfig {
                base_url: "https://api.example.com".to_string(),
                api_key: None,
                timeout_secs: 15,
            },
            aggregator: AggregatorConfig::default(),
            filters: FiltersConfig::default(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_validate_empty_base_url_fails() {
        let mut config = valid_config();
        config.trips.base_url = "  ".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_zero_trip_timeout_fails() {
        let mut config = valid_config();
        config.trips.timeout_secs = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_validate_zero_page_size_fails() {
        let mut config = valid_config();
        config.aggregator.default_page_size = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_max_below_default_fails() {
        let mut config = valid_config();
        config.aggregator.max_page_size = 6;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_unknown_currency_fails() {
        let mut config = valid_config();
        config.filters.default_currency = "ZZZ".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("ZZZ"));
    }
}
