//! Projection engine
//!
//! Pure computations over ledger data: monthly normalization, per-month
//! occurrence evaluation and per-account projection. Nothing here performs
//! I/O or holds state between calls.

pub mod normalizer;
pub mod occurrence;
pub mod projector;

pub use normalizer::{monthly_burden, normalize_event, normalize_to_monthly};
pub use occurrence::{
    amount_in_month, is_active_in, occurs_in_month, sum_in_month, AggregationPolicy, YearlyRule,
};
pub use projector::{
    check_horizon, project_account, AccountEvents, MonthProjection, MAX_HORIZON_MONTHS,
};
