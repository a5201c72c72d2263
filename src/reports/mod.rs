//! Reports module for Cashflow
//!
//! Aggregate reports built on the occurrence evaluator and normalizer:
//! monthly overview, category breakdown, trend, forecast, per-account
//! forecasts and a dashboard summary.

pub mod account_forecast;
pub mod category_breakdown;
pub mod dashboard;
pub mod forecast;
pub mod monthly_overview;
pub mod trend;

pub use account_forecast::AccountForecast;
pub use category_breakdown::{CategoryBreakdown, CategorySpending};
pub use dashboard::DashboardSummary;
pub use forecast::{ForecastMonth, ForecastReport};
pub use monthly_overview::MonthlyOverview;
pub use trend::{TrendPoint, TrendReport};
