//! Cashflow - recurring income, expense and transfer projections
//!
//! This library turns a ledger of accounts and scheduled money events into
//! month-by-month figures: how much a recurring item posts in a given month,
//! its monthly-equivalent rate, per-account balance projections and aggregate
//! reports across the whole ledger.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Core data (money, months, recurrences, events, accounts)
//! - `services`: Projection engine (normalizer, occurrence evaluator, projector)
//! - `reports`: Overview, category breakdown, trend, forecast and dashboard
//! - `storage`: Ledger snapshot and the query trait reports read through
//! - `config`: Configuration and path management
//! - `display` / `export`: Terminal tables and CSV output
//! - `cli`: Command handlers for the `cashflow` binary
//! - `error`: Custom error types
//! - `logging`: Tracing subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use cashflow::reports::ForecastReport;
//! use cashflow::services::AggregationPolicy;
//! use cashflow::storage::Ledger;
//!
//! let ledger = Ledger::load("ledger.json")?;
//! let reference = MonthPeriod::current();
//! let forecast = ForecastReport::generate(&ledger, 6, reference, AggregationPolicy::default())?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{CashflowError, CashflowResult};
