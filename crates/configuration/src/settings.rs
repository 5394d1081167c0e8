use crate::error::ConfigError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analytics: AnalyticsConfig,
    pub logging: LoggingSettings,
}

/// Tunable windows and thresholds for the four analytics components.
///
/// Every field defaults to the engine's reference constant, so an empty
/// configuration reproduces the reference behavior exactly.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub market_share: MarketShareParams,
    pub turning_points: TurningPointParams,
    pub tonnage: TonnageParams,
    pub arbitrage: ArbitrageParams,
}

/// Parameters for the market share calculator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarketShareParams {
    /// How far (in percent) the latest period share must move away from the mean
    /// of prior periods before the trend is reported as increasing or decreasing.
    pub trend_tolerance_pct: Decimal,
}

/// Parameters for the turning point detector.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TurningPointParams {
    /// Series shorter than this produce the neutral result.
    pub min_points: usize,
    pub sma_fast_period: usize,
    pub sma_slow_period: usize,
    pub rsi_period: usize,
    pub rsi_overbought: Decimal,
    pub rsi_oversold: Decimal,
    /// Overbought crossings above this level are reported as strong.
    pub rsi_extreme_overbought: Decimal,
    /// Oversold crossings below this level are reported as strong.
    pub rsi_extreme_oversold: Decimal,
    pub bb_period: usize,
    pub bb_std_dev: Decimal,
    /// Breakouts beyond this many standard deviations are reported as strong.
    pub bb_strong_std_dev: Decimal,
    /// How many of the most recent support (and resistance) levels to report.
    pub support_resistance_levels: usize,
}

/// Parameters for the tonnage balance analyzer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TonnageParams {
    /// supply/demand below this ratio is `tight`.
    pub tight_ratio: Decimal,
    /// supply/demand above this ratio is `oversupplied`.
    pub oversupplied_ratio: Decimal,
}

/// Parameters for the arbitrage opportunity finder.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArbitrageParams {
    /// Minimum premium of the higher rate over the lower one, in percent of the lower.
    pub pairwise_min_pct: Decimal,
    pub pairwise_low_risk_pct: Decimal,
    pub pairwise_medium_risk_pct: Decimal,
    /// Voyage duration assumed for routes without `durationDays`.
    pub default_duration_days: Decimal,
    /// Required uplift of triangle revenue/day over the best single leg, in percent.
    pub triangulation_min_uplift_pct: Decimal,
    /// Standard deviations above the vessel-type mean that flag a rate outlier.
    pub outlier_std_devs: Decimal,
    /// Minimum observations per vessel type before outliers are searched.
    pub outlier_min_observations: usize,
    /// Ballast leg cost as a fraction of the vessel-type mean rate.
    pub ballast_cost_ratio: Decimal,
    pub ballast_low_risk_pct: Decimal,
    pub ballast_medium_risk_pct: Decimal,
}

/// Where and how verbosely the binary logs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive used when `RUST_LOG` is not set.
    pub level: String,
    /// When set, logs go to a daily-rolling file in this directory instead of stderr.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

// --- Default Implementations ---
// These are the reference constants of the engine.

impl Default for MarketShareParams {
    fn default() -> Self {
        Self {
            trend_tolerance_pct: dec!(5),
        }
    }
}

impl Default for TurningPointParams {
    fn default() -> Self {
        Self {
            min_points: 5,
            sma_fast_period: 20,
            sma_slow_period: 50,
            rsi_period: 14,
            rsi_overbought: dec!(70),
            rsi_oversold: dec!(30),
            rsi_extreme_overbought: dec!(80),
            rsi_extreme_oversold: dec!(20),
            bb_period: 20,
            bb_std_dev: dec!(2),
            bb_strong_std_dev: dec!(2.5),
            support_resistance_levels: 3,
        }
    }
}

impl Default for TonnageParams {
    fn default() -> Self {
        Self {
            tight_ratio: dec!(0.85),
            oversupplied_ratio: dec!(1.15),
        }
    }
}

impl Default for ArbitrageParams {
    fn default() -> Self {
        Self {
            pairwise_min_pct: dec!(15),
            pairwise_low_risk_pct: dec!(30),
            pairwise_medium_risk_pct: dec!(20),
            default_duration_days: dec!(30),
            triangulation_min_uplift_pct: dec!(10),
            outlier_std_devs: dec!(1.5),
            outlier_min_observations: 3,
            ballast_cost_ratio: dec!(0.3),
            ballast_low_risk_pct: dec!(40),
            ballast_medium_risk_pct: dec!(25),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "market-intel.log".to_string(),
        }
    }
}

impl AnalyticsConfig {
    /// Rejects parameter combinations under which the components would be meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let tp = &self.turning_points;
        if tp.sma_fast_period == 0 || tp.rsi_period == 0 || tp.bb_period < 2 {
            return Err(ConfigError::ValidationError(
                "Indicator periods must be positive (Bollinger period at least 2)".to_string(),
            ));
        }
        if tp.sma_fast_period >= tp.sma_slow_period {
            return Err(ConfigError::ValidationError(
                "Fast SMA period must be less than slow SMA period".to_string(),
            ));
        }
        if tp.rsi_oversold >= tp.rsi_overbought {
            return Err(ConfigError::ValidationError(
                "RSI oversold level must be below the overbought level".to_string(),
            ));
        }
        if tp.bb_std_dev <= Decimal::ZERO || tp.bb_strong_std_dev < tp.bb_std_dev {
            return Err(ConfigError::ValidationError(
                "Bollinger strong width must be at least the (positive) band width".to_string(),
            ));
        }

        let tonnage = &self.tonnage;
        if tonnage.tight_ratio <= Decimal::ZERO || tonnage.tight_ratio >= tonnage.oversupplied_ratio {
            return Err(ConfigError::ValidationError(
                "Tight ratio must be positive and below the oversupplied ratio".to_string(),
            ));
        }

        let arb = &self.arbitrage;
        if arb.default_duration_days <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "Default voyage duration must be greater than 0".to_string(),
            ));
        }
        if arb.outlier_min_observations < 2 {
            return Err(ConfigError::ValidationError(
                "Outlier search needs at least 2 observations per vessel type".to_string(),
            ));
        }
        if self.market_share.trend_tolerance_pct.is_sign_negative() {
            return Err(ConfigError::ValidationError(
                "Trend tolerance cannot be negative".to_string(),
            ));
        }

        Ok(())
    }
}
