//! Display formatting for terminal output
//!
//! Tables for projections and accounts, plus small text helpers shared by the
//! reports' terminal renderers.

pub mod report;
pub mod table;

pub use report::{format_bar, separator, truncate};
pub use table::{account_table, projection_table};
