//! User settings for Cashflow
//!
//! Report defaults and the yearly-handling rules the engine is run with.

use serde::{Deserialize, Serialize};

use super::paths::CashflowPaths;
use crate::error::CashflowError;
use crate::storage::{read_json, write_json_atomic};
use crate::services::{AggregationPolicy, YearlyRule};

/// User settings for Cashflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Months shown by `forecast` and `project` when not given
    #[serde(default = "default_months")]
    pub default_forecast_months: u32,

    /// Months shown by `trend` when not given
    #[serde(default = "default_months")]
    pub default_trend_months: u32,

    /// Yearly income handling in aggregate reports
    #[serde(default = "default_income_rule")]
    pub income_yearly_rule: YearlyRule,

    /// Yearly expense handling in aggregate reports
    #[serde(default)]
    pub expense_yearly_rule: YearlyRule,

    /// Yearly handling for account projections (both sides)
    #[serde(default)]
    pub projection_yearly_rule: YearlyRule,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_months() -> u32 {
    6
}

fn default_income_rule() -> YearlyRule {
    YearlyRule::Smoothed
}

fn into_config_error(err: CashflowError) -> CashflowError {
    match err {
        CashflowError::Storage(message) => CashflowError::Config(message),
        other => other,
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            default_forecast_months: default_months(),
            default_trend_months: default_months(),
            income_yearly_rule: default_income_rule(),
            expense_yearly_rule: YearlyRule::default(),
            projection_yearly_rule: YearlyRule::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    ///
    /// Nothing is written; `config --init` persists the defaults.
    pub fn load_or_create(paths: &CashflowPaths) -> Result<Self, CashflowError> {
        read_json(paths.settings_file(), "settings").map_err(into_config_error)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &CashflowPaths) -> Result<(), CashflowError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), "settings", self).map_err(into_config_error)
    }

    /// Policy for overview, breakdown, trend and forecast reports
    pub fn aggregation_policy(&self) -> AggregationPolicy {
        AggregationPolicy {
            income_yearly: self.income_yearly_rule,
            expense_yearly: self.expense_yearly_rule,
        }
    }

    /// Policy for per-account projections
    pub fn projection_policy(&self) -> AggregationPolicy {
        AggregationPolicy::uniform(self.projection_yearly_rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.default_forecast_months, 6);
        assert_eq!(settings.aggregation_policy(), AggregationPolicy::reporting());
        assert_eq!(settings.projection_policy(), AggregationPolicy::exact());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"expense_yearly_rule": "smoothed"}"#).unwrap();
        assert_eq!(settings.schema_version, 1);
        assert_eq!(
            settings.aggregation_policy(),
            AggregationPolicy::uniform(YearlyRule::Smoothed)
        );
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CashflowPaths::with_base_dir(temp_dir.path().to_path_buf());

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, Settings::default());

        let mut settings = Settings::default();
        settings.default_trend_months = 12;
        settings.projection_yearly_rule = YearlyRule::Smoothed;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.default_trend_months, 12);
        assert_eq!(
            loaded.projection_policy(),
            AggregationPolicy::uniform(YearlyRule::Smoothed)
        );
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CashflowPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{ nope").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, CashflowError::Config(_)));
    }
}
