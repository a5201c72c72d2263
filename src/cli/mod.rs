//! CLI command handlers
//!
//! Bridges clap argument parsing with the report layer.

pub mod normalize;
pub mod report;

use chrono::NaiveDate;

use crate::error::{CashflowError, CashflowResult};
use crate::models::MonthPeriod;

pub use normalize::handle_normalize_command;
pub use report::{handle_report_command, ReportCommands, ReportContext};

/// Parse a `YYYY-MM` month argument
pub fn parse_period(value: &str) -> CashflowResult<MonthPeriod> {
    MonthPeriod::parse(value).map_err(|e| {
        CashflowError::Validation(format!(
            "Invalid period format: {}. Use YYYY-MM (e.g., 2025-01)",
            e
        ))
    })
}

/// Parse a `YYYY-MM-DD` date argument
pub fn parse_date(value: &str, label: &str) -> CashflowResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        CashflowError::Validation(format!(
            "Invalid {} date format: {}. Use YYYY-MM-DD",
            label, value
        ))
    })
}

/// Resolve the `--as-of` month, defaulting to the current month
pub fn resolve_reference(as_of: Option<&str>) -> CashflowResult<MonthPeriod> {
    as_of
        .map(parse_period)
        .transpose()
        .map(|period| period.unwrap_or_else(MonthPeriod::current))
}
