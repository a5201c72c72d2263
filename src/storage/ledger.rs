//! Ledger snapshot and filtered queries
//!
//! The projection engine does not care where events come from, only that it
//! can ask for them by account, category and date range. [`LedgerSource`] is
//! that query surface; [`Ledger`] is the in-memory snapshot behind it, loaded
//! from a JSON file.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::file_io::{read_json_required, write_json_atomic};
use crate::error::{CashflowError, CashflowResult};
use crate::models::{
    Account, AccountId, Category, CategoryId, Expense, Income, MoneyEvent, Transfer, UNCATEGORIZED,
};

/// Filter criteria for event queries; unset fields match everything
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub account_id: Option<AccountId>,
    pub category_id: Option<CategoryId>,
    /// Inclusive range; keeps events that can post at any point inside it
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

impl EventFilter {
    /// Match every event
    pub fn all() -> Self {
        Self::default()
    }

    /// Match events owned by one account
    pub fn for_account(account_id: AccountId) -> Self {
        Self {
            account_id: Some(account_id),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.date_range = Some((from, to));
        self
    }

    fn matches(
        &self,
        account_id: AccountId,
        category_id: Option<CategoryId>,
        event: &MoneyEvent,
    ) -> bool {
        if self.account_id.is_some_and(|id| id != account_id) {
            return false;
        }
        if self.category_id.is_some() && self.category_id != category_id {
            return false;
        }
        match self.date_range {
            Some((from, to)) => event.is_active_between(from, to),
            None => true,
        }
    }
}

/// Read access to accounts, categories and scheduled events
pub trait LedgerSource {
    fn accounts(&self) -> &[Account];

    fn categories(&self) -> &[Category];

    /// Incomes matching the filter, in stored order
    fn incomes(&self, filter: &EventFilter) -> Vec<&Income>;

    /// Expenses matching the filter, in stored order
    fn expenses(&self, filter: &EventFilter) -> Vec<&Expense>;

    /// Every transfer
    fn transfers(&self) -> &[Transfer];

    /// Transfers where the account is either the source or the target
    fn transfers_for(&self, account_id: AccountId) -> Vec<&Transfer> {
        self.transfers()
            .iter()
            .filter(|t| t.from_account == account_id || t.to_account == account_id)
            .collect()
    }

    fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts().iter().find(|a| a.id == id)
    }

    fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories().iter().find(|c| c.id == id)
    }

    /// Display name for an optional category, falling back to the uncategorized bucket
    fn category_name(&self, id: Option<CategoryId>) -> String {
        id.and_then(|id| self.category(id))
            .map(|c| c.name.clone())
            .unwrap_or_else(|| UNCATEGORIZED.to_string())
    }
}

/// In-memory ledger snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub incomes: Vec<Income>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub transfers: Vec<Transfer>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a ledger snapshot from a JSON file
    pub fn load(path: impl AsRef<Path>) -> CashflowResult<Self> {
        let path = path.as_ref();
        let ledger: Ledger = read_json_required(path, "ledger")?;
        ledger.validate()?;
        debug!(
            path = %path.display(),
            accounts = ledger.accounts.len(),
            incomes = ledger.incomes.len(),
            expenses = ledger.expenses.len(),
            transfers = ledger.transfers.len(),
            "loaded ledger"
        );
        Ok(ledger)
    }

    /// Write the snapshot atomically
    pub fn save(&self, path: impl AsRef<Path>) -> CashflowResult<()> {
        write_json_atomic(path, "ledger", self)
    }

    /// Check every entity and cross-reference
    ///
    /// Unknown account references are errors; unknown category references
    /// only warn and fall into the uncategorized bucket.
    pub fn validate(&self) -> CashflowResult<()> {
        for account in &self.accounts {
            account
                .validate()
                .map_err(|e| CashflowError::validation(format!("{}: {}", account.name, e)))?;
        }

        for category in &self.categories {
            category
                .validate()
                .map_err(|e| CashflowError::validation(format!("category {}: {}", category.id, e)))?;
        }

        for income in &self.incomes {
            self.require_account(income.account_id)?;
            self.check_category(income.category_id);
            income
                .event
                .validate()
                .map_err(|e| CashflowError::validation(format!("income {}: {}", income.id, e)))?;
        }

        for expense in &self.expenses {
            self.require_account(expense.account_id)?;
            self.check_category(expense.category_id);
            expense
                .event
                .validate()
                .map_err(|e| CashflowError::validation(format!("expense {}: {}", expense.id, e)))?;
        }

        for transfer in &self.transfers {
            self.require_account(transfer.from_account)?;
            self.require_account(transfer.to_account)?;
            transfer.validate().map_err(|e| {
                CashflowError::validation(format!("transfer {}: {}", transfer.id, e))
            })?;
        }

        Ok(())
    }

    /// Find an account by name (case-insensitive) or ID
    pub fn find_account(&self, identifier: &str) -> Option<&Account> {
        let needle = identifier.trim();
        self.accounts
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(needle))
            .or_else(|| {
                needle
                    .parse::<AccountId>()
                    .ok()
                    .and_then(|id| self.account(id))
            })
    }

    fn require_account(&self, id: AccountId) -> CashflowResult<()> {
        if self.account(id).is_some() {
            Ok(())
        } else {
            Err(CashflowError::account_not_found(id.to_string()))
        }
    }

    fn check_category(&self, id: Option<CategoryId>) {
        if let Some(id) = id {
            if self.category(id).is_none() {
                warn!(category = %id, "event references unknown category");
            }
        }
    }
}

impl LedgerSource for Ledger {
    fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    fn categories(&self) -> &[Category] {
        &self.categories
    }

    fn incomes(&self, filter: &EventFilter) -> Vec<&Income> {
        self.incomes
            .iter()
            .filter(|i| filter.matches(i.account_id, i.category_id, &i.event))
            .collect()
    }

    fn expenses(&self, filter: &EventFilter) -> Vec<&Expense> {
        self.expenses
            .iter()
            .filter(|e| filter.matches(e.account_id, e.category_id, &e.event))
            .collect()
    }

    fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }
}
