//! Export module for Cashflow
//!
//! CSV output for every report type.

pub mod csv;

pub use self::csv::{export_to_file, write_csv, CsvReport};
