//! Money event models
//!
//! A [`MoneyEvent`] is the schedule shared by incomes, expenses and transfer
//! legs: a positive amount, a recurrence, a start date and an optional end
//! date. [`Income`], [`Expense`] and [`Transfer`] attach ownership and
//! attribution to it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, CategoryId, ExpenseId, IncomeId, TransferId};
use super::money::Money;
use super::recurrence::{Recurrence, RecurrenceValidationError};

/// A scheduled cash movement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyEvent {
    /// Amount per posting, always positive
    pub amount: Money,

    #[serde(default)]
    pub recurrence: Recurrence,

    pub start_date: NaiveDate,

    /// Last date the event can post; ignored for one-off events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl MoneyEvent {
    /// Create an open-ended event
    pub fn new(amount: Money, recurrence: Recurrence, start_date: NaiveDate) -> Self {
        Self {
            amount,
            recurrence,
            start_date,
            end_date: None,
        }
    }

    /// Set the end date
    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// The end date that actually bounds this event
    ///
    /// One-off events end on their start date regardless of `end_date`.
    pub fn effective_end(&self) -> Option<NaiveDate> {
        match self.recurrence {
            Recurrence::Once => Some(self.start_date),
            _ => self.end_date,
        }
    }

    /// Whether the event can post at any point in the inclusive date range
    pub fn is_active_between(&self, from: NaiveDate, to: NaiveDate) -> bool {
        if self.start_date > to {
            return false;
        }
        match self.effective_end() {
            Some(end) => end >= from,
            None => true,
        }
    }

    /// Validate the event
    pub fn validate(&self) -> Result<(), EventValidationError> {
        if !self.amount.is_positive() {
            return Err(EventValidationError::NonPositiveAmount(self.amount));
        }

        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(EventValidationError::EndBeforeStart {
                    start: self.start_date,
                    end,
                });
            }
        }

        self.recurrence
            .validate()
            .map_err(EventValidationError::Recurrence)
    }
}

/// Validation errors for money events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    NonPositiveAmount(Money),
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    Recurrence(RecurrenceValidationError),
}

impl fmt::Display for EventValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be positive (got {})", amount)
            }
            Self::EndBeforeStart { start, end } => {
                write!(f, "End date {} is before start date {}", end, start)
            }
            Self::Recurrence(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for EventValidationError {}

/// Money coming into an account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Income {
    #[serde(default)]
    pub id: IncomeId,
    pub account_id: AccountId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub event: MoneyEvent,
}

impl Income {
    pub fn new(account_id: AccountId, description: impl Into<String>, event: MoneyEvent) -> Self {
        Self {
            id: IncomeId::new(),
            account_id,
            category_id: None,
            description: description.into(),
            event,
        }
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
}

/// Money leaving an account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    #[serde(default)]
    pub id: ExpenseId,
    pub account_id: AccountId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub event: MoneyEvent,
}

impl Expense {
    pub fn new(account_id: AccountId, description: impl Into<String>, event: MoneyEvent) -> Self {
        Self {
            id: ExpenseId::new(),
            account_id,
            category_id: None,
            description: description.into(),
            event,
        }
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
}

/// Money moving between two accounts
///
/// Counts as a transfer-out for `from_account` and a transfer-in for
/// `to_account`; it never counts as income or expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transfer {
    #[serde(default)]
    pub id: TransferId,
    pub from_account: AccountId,
    pub to_account: AccountId,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub event: MoneyEvent,
}

impl Transfer {
    pub fn new(
        from_account: AccountId,
        to_account: AccountId,
        description: impl Into<String>,
        event: MoneyEvent,
    ) -> Self {
        Self {
            id: TransferId::new(),
            from_account,
            to_account,
            description: description.into(),
            event,
        }
    }

    /// Validate the transfer's schedule and endpoints
    pub fn validate(&self) -> Result<(), TransferValidationError> {
        if self.from_account == self.to_account {
            return Err(TransferValidationError::SameAccount);
        }
        self.event.validate().map_err(TransferValidationError::Event)
    }
}

/// Validation errors for transfers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferValidationError {
    SameAccount,
    Event(EventValidationError),
}

impl fmt::Display for TransferValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SameAccount => write!(f, "Cannot transfer to the same account"),
            Self::Event(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for TransferValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_validation() {
        let event = MoneyEvent::new(Money::from_cents(5000), Recurrence::Monthly, date(2024, 1, 1));
        assert!(event.validate().is_ok());

        let zero = MoneyEvent::new(Money::zero(), Recurrence::Monthly, date(2024, 1, 1));
        assert!(matches!(
            zero.validate(),
            Err(EventValidationError::NonPositiveAmount(_))
        ));

        let backwards = event.clone().with_end_date(date(2023, 12, 31));
        assert!(matches!(
            backwards.validate(),
            Err(EventValidationError::EndBeforeStart { .. })
        ));

        let bad_interval = MoneyEvent::new(
            Money::from_cents(100),
            Recurrence::Custom { interval: 0 },
            date(2024, 1, 1),
        );
        assert!(matches!(
            bad_interval.validate(),
            Err(EventValidationError::Recurrence(_))
        ));
    }

    #[test]
    fn test_once_end_date() {
        let event = MoneyEvent::new(Money::from_cents(100), Recurrence::Once, date(2024, 3, 10));

        let later = event.clone().with_end_date(date(2024, 12, 31));
        assert!(later.validate().is_ok());
        assert_eq!(later.effective_end(), Some(date(2024, 3, 10)));

        let backwards = event.with_end_date(date(2024, 1, 1));
        assert!(matches!(
            backwards.validate(),
            Err(EventValidationError::EndBeforeStart { .. })
        ));
    }

    #[test]
    fn test_is_active_between() {
        let event = MoneyEvent::new(Money::from_cents(100), Recurrence::Monthly, date(2024, 3, 1))
            .with_end_date(date(2024, 6, 30));
        assert!(event.is_active_between(date(2024, 1, 1), date(2024, 3, 1)));
        assert!(event.is_active_between(date(2024, 6, 30), date(2024, 12, 31)));
        assert!(!event.is_active_between(date(2024, 7, 1), date(2024, 12, 31)));
        assert!(!event.is_active_between(date(2024, 1, 1), date(2024, 2, 29)));
    }

    #[test]
    fn test_transfer_same_account() {
        let account = AccountId::new();
        let transfer = Transfer::new(
            account,
            account,
            "Loop",
            MoneyEvent::new(Money::from_cents(100), Recurrence::Monthly, date(2024, 1, 1)),
        );
        assert_eq!(transfer.validate(), Err(TransferValidationError::SameAccount));
    }

    #[test]
    fn test_flattened_json_shape() {
        let json = r#"{
            "account_id": "550e8400-e29b-41d4-a716-446655440000",
            "description": "Rent",
            "amount": "1200.00",
            "recurrence": {"kind": "monthly"},
            "start_date": "2024-01-01"
        }"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.description, "Rent");
        assert_eq!(expense.event.amount, Money::from_cents(120000));
        assert_eq!(expense.event.recurrence, Recurrence::Monthly);
        assert_eq!(expense.event.end_date, None);
        assert_eq!(expense.category_id, None);
    }
}
