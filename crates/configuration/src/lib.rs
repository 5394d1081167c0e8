use crate::error::ConfigError;
use crate::settings::Config;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{
    AnalyticsConfig, ArbitrageParams, LoggingSettings, MarketShareParams, TonnageParams,
    TurningPointParams,
};

/// Prefix for environment overrides, e.g. `MARKET_INTEL__ANALYTICS__TONNAGE__TIGHT_RATIO=0.8`.
pub const ENV_PREFIX: &str = "MARKET_INTEL";

/// Loads the application configuration.
///
/// Reads `path` when given (the file must then exist), otherwise an optional
/// `config.toml` in the working directory, then applies environment overrides.
/// Every key is optional; missing ones take the engine's reference defaults.
/// The analytics parameters are validated before the config is returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name("config.toml").required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    finish(builder)
}

/// Parses a configuration from TOML text, without consulting the environment.
pub fn load_config_from_toml(toml: &str) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    finish(builder)
}

fn finish(builder: config::Config) -> Result<Config, ConfigError> {
    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.analytics.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_toml_yields_reference_defaults() {
        let config = load_config_from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.analytics.turning_points.sma_slow_period, 50);
        assert_eq!(config.analytics.arbitrage.default_duration_days, dec!(30));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = load_config_from_toml(
            r#"
            [analytics.tonnage]
            tight_ratio = 0.8

            [analytics.arbitrage]
            pairwise_min_pct = 20

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.analytics.tonnage.tight_ratio, dec!(0.8));
        assert_eq!(config.analytics.tonnage.oversupplied_ratio, dec!(1.15));
        assert_eq!(config.analytics.arbitrage.pairwise_min_pct, dec!(20));
        assert_eq!(config.analytics.arbitrage.ballast_cost_ratio, dec!(0.3));
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.directory.is_none());
    }

    #[test]
    fn inverted_sma_windows_are_rejected() {
        let result = load_config_from_toml(
            r#"
            [analytics.turning_points]
            sma_fast_period = 50
            sma_slow_period = 20
            "#,
        );
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn overlapping_tonnage_bands_are_rejected() {
        let mut analytics = AnalyticsConfig::default();
        analytics.tonnage.tight_ratio = dec!(1.2);
        assert!(matches!(analytics.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = load_config(Some(Path::new("/definitely/not/here/market-intel.toml")));
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
