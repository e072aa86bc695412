//! Application configuration management.

use serde::Deserialize;

use crate::error::AppResult;
use crate::types::Currency;

/// Application configuration.
///
/// Every section has defaults, so an empty configuration is valid.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Display configuration.
    #[serde(default)]
    pub display: DisplayConfig,
    /// Snapshot file configuration.
    #[serde(default)]
    pub snapshot: SnapshotConfig,
    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
}

/// How amounts are shown to the user.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Currency used to format amounts.
    #[serde(default)]
    pub currency: Currency,
    /// Decimal places debts are rounded to before display.
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            decimal_places: default_decimal_places(),
        }
    }
}

impl DisplayConfig {
    /// Decimal places debts are rounded to, never finer than the currency's
    /// minor unit.
    #[must_use]
    pub fn rounding_places(&self) -> u32 {
        self.decimal_places.min(self.currency.minor_units())
    }
}

fn default_decimal_places() -> u32 {
    2
}

/// Where the exported snapshot lives.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotConfig {
    /// Path to the JSON snapshot file.
    #[serde(default = "default_snapshot_path")]
    pub path: String,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: default_snapshot_path(),
        }
    }
}

fn default_snapshot_path() -> String {
    "splitbill.json".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "splitbill=info".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, lowest priority first: `config/default`, `config/{RUN_MODE}`
    /// and `SPLITBILL__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("SPLITBILL").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
