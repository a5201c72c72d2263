//! Configuration module for Cashflow
//!
//! Path resolution for the settings file and default ledger, plus persisted
//! report preferences.

pub mod paths;
pub mod settings;

pub use paths::CashflowPaths;
pub use settings::Settings;
