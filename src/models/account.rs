//! Account model
//!
//! Represents financial accounts and how their balances carry forward in a
//! projection.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountId;
use super::money::Money;

/// Type of financial account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Checking / current account
    Checking,
    /// Savings account
    Savings,
    /// Investment or ETF account
    Investment,
    /// Cash/wallet
    Cash,
    /// Credit card
    Credit,
    /// Other account type
    Other,
}

impl AccountType {
    /// How a projected balance behaves for this account type
    pub fn classification(&self) -> BalanceClassification {
        match self {
            Self::Savings | Self::Investment => BalanceClassification::Cumulative,
            Self::Checking | Self::Cash | Self::Credit | Self::Other => {
                BalanceClassification::Snapshot
            }
        }
    }

    /// Parse account type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "checking" | "current" => Some(Self::Checking),
            "savings" => Some(Self::Savings),
            "investment" | "etf" => Some(Self::Investment),
            "cash" => Some(Self::Cash),
            "credit" | "credit_card" | "creditcard" => Some(Self::Credit),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl Default for AccountType {
    fn default() -> Self {
        Self::Checking
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checking => write!(f, "Checking"),
            Self::Savings => write!(f, "Savings"),
            Self::Investment => write!(f, "Investment"),
            Self::Cash => write!(f, "Cash"),
            Self::Credit => write!(f, "Credit Card"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// Whether a projected balance accumulates month over month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceClassification {
    /// Balance carries forward additively (savings, investment)
    Cumulative,
    /// Each month's balance is that month's net flow only
    Snapshot,
}

impl fmt::Display for BalanceClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cumulative => write!(f, "cumulative"),
            Self::Snapshot => write!(f, "snapshot"),
        }
    }
}

/// A financial account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    #[serde(default)]
    pub id: AccountId,

    /// Account name (e.g., "Chase Checking")
    pub name: String,

    /// Type of account
    #[serde(rename = "type", default)]
    pub account_type: AccountType,

    /// Balance as of today
    #[serde(default)]
    pub current_balance: Money,
}

impl Account {
    /// Create a new account with a zero balance
    pub fn new(name: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            id: AccountId::new(),
            name: name.into(),
            account_type,
            current_balance: Money::zero(),
        }
    }

    /// Create a new account with a current balance
    pub fn with_balance(
        name: impl Into<String>,
        account_type: AccountType,
        current_balance: Money,
    ) -> Self {
        let mut account = Self::new(name, account_type);
        account.current_balance = current_balance;
        account
    }

    /// Balance behaviour used by the projector
    pub fn classification(&self) -> BalanceClassification {
        self.account_type.classification()
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.name.trim().is_empty() {
            return Err(AccountValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(AccountValidationError::NameTooLong(self.name.len()));
        }

        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.account_type)
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Account name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Account name too long ({} chars, max 100)", len)
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}
