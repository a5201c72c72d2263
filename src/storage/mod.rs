//! Storage layer for Cashflow
//!
//! Provides the read-only ledger snapshot the reports query, plus JSON file
//! helpers with atomic writes.

pub mod file_io;
pub mod ledger;

pub use file_io::{read_json, read_json_required, write_json_atomic};
pub use ledger::{EventFilter, Ledger, LedgerSource};
