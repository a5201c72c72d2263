//! Core data models for Cashflow
//!
//! This module contains the plain data the projection engine reads: accounts,
//! categories, money events with their recurrence, and calendar months.

pub mod account;
pub mod category;
pub mod event;
pub mod ids;
pub mod money;
pub mod period;
pub mod recurrence;

pub use account::{Account, AccountType, BalanceClassification};
pub use category::{Category, UNCATEGORIZED};
pub use event::{Expense, Income, MoneyEvent, Transfer};
pub use ids::{AccountId, CategoryId, ExpenseId, IncomeId, TransferId};
pub use money::Money;
pub use period::MonthPeriod;
pub use recurrence::Recurrence;
