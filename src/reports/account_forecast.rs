//! Account Forecast Report
//!
//! Per-account projections with the account's metadata attached.

use serde::Serialize;
use tracing::debug;

use crate::error::CashflowResult;
use crate::models::{Account, AccountId, AccountType, BalanceClassification, Money, MonthPeriod};
use crate::services::{project_account, AccountEvents, AggregationPolicy, MonthProjection};
use crate::storage::LedgerSource;

/// Projection of one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountForecast {
    pub account_id: AccountId,
    pub account_name: String,
    pub account_type: AccountType,
    pub classification: BalanceClassification,
    pub starting_balance: Money,
    pub months: Vec<MonthProjection>,
}

impl AccountForecast {
    /// Project a single account
    ///
    /// # Errors
    ///
    /// Returns a validation error when `months` is less than 1.
    pub fn generate<S: LedgerSource + ?Sized>(
        source: &S,
        account: &Account,
        months: i32,
        reference: MonthPeriod,
        policy: AggregationPolicy,
    ) -> CashflowResult<Self> {
        let events = AccountEvents::for_account(source, account.id);
        let projection = project_account(account, &events, months, reference, policy)?;

        Ok(Self {
            account_id: account.id,
            account_name: account.name.clone(),
            account_type: account.account_type,
            classification: account.classification(),
            starting_balance: account.current_balance.round_currency(),
            months: projection,
        })
    }

    /// Project every account in the ledger, in ledger order
    pub fn generate_all<S: LedgerSource + ?Sized>(
        source: &S,
        months: i32,
        reference: MonthPeriod,
        policy: AggregationPolicy,
    ) -> CashflowResult<Vec<Self>> {
        let forecasts = source
            .accounts()
            .iter()
            .map(|account| Self::generate(source, account, months, reference, policy))
            .collect::<CashflowResult<Vec<_>>>()?;

        debug!(accounts = forecasts.len(), months, "projected all accounts");
        Ok(forecasts)
    }

    /// Balance reported for the final month
    ///
    /// For snapshot accounts this is the last month's net flow.
    pub fn ending_balance(&self) -> Money {
        self.months
            .last()
            .map(|m| m.balance)
            .unwrap_or(self.starting_balance)
    }

    /// Net flow summed across the projection
    pub fn total_net(&self) -> Money {
        self.months.iter().map(|m| m.net).sum()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} ({}, {})\n",
            self.account_name, self.account_type, self.classification
        ));
        output.push_str(&format!(
            "Current balance: {}\n",
            self.starting_balance.format_with_symbol(currency)
        ));
        output.push_str(&crate::display::projection_table(&self.months, currency));
        output.push('\n');

        let balance_label = match self.classification {
            BalanceClassification::Cumulative => "Ending balance",
            BalanceClassification::Snapshot => "Final month net",
        };
        output.push_str(&format!(
            "{}: {}    Total net: {}\n",
            balance_label,
            self.ending_balance().format_with_symbol(currency),
            self.total_net().format_with_symbol(currency)
        ));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, Income, MoneyEvent, Recurrence, Transfer};
    use crate::storage::Ledger;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn monthly(amount: rust_decimal::Decimal) -> MoneyEvent {
        MoneyEvent::new(Money::new(amount), Recurrence::Monthly, date(2024, 1, 1))
    }

    fn sample_ledger() -> Ledger {
        let checking =
            Account::with_balance("Checking", AccountType::Checking, Money::new(dec!(2500)));
        let savings =
            Account::with_balance("Savings", AccountType::Savings, Money::new(dec!(10000)));

        let mut ledger = Ledger::new();
        ledger
            .incomes
            .push(Income::new(checking.id, "Salary", monthly(dec!(4000))));
        ledger
            .expenses
            .push(Expense::new(checking.id, "Rent", monthly(dec!(1500))));
        ledger.transfers.push(Transfer::new(
            checking.id,
            savings.id,
            "Save",
            monthly(dec!(1000)),
        ));
        ledger.accounts.push(checking);
        ledger.accounts.push(savings);
        ledger
    }

    #[test]
    fn test_transfer_legs_per_account() {
        let ledger = sample_ledger();
        let forecasts = AccountForecast::generate_all(
            &ledger,
            3,
            MonthPeriod::new(2024, 6).unwrap(),
            AggregationPolicy::exact(),
        )
        .unwrap();

        let checking = &forecasts[0];
        assert_eq!(checking.classification, BalanceClassification::Snapshot);
        assert!(checking.months.iter().all(|m| m.net == Money::new(dec!(1500))));
        assert_eq!(checking.ending_balance(), Money::new(dec!(1500)));
        assert_eq!(checking.total_net(), Money::new(dec!(4500)));

        let savings = &forecasts[1];
        assert_eq!(savings.classification, BalanceClassification::Cumulative);
        assert_eq!(savings.months[0].transfers_in, Money::new(dec!(1000)));
        assert_eq!(savings.ending_balance(), Money::new(dec!(13000)));
    }

    #[test]
    fn test_format_terminal() {
        let ledger = sample_ledger();
        let forecast = AccountForecast::generate(
            &ledger,
            &ledger.accounts[1],
            2,
            MonthPeriod::new(2024, 6).unwrap(),
            AggregationPolicy::exact(),
        )
        .unwrap();
        let output = forecast.format_terminal("$");
        assert!(output.contains("Savings (Savings, cumulative)"));
        assert!(output.contains("2024-07"));
        assert!(output.contains("Ending balance: $12000.00"));
    }

    #[test]
    fn test_invalid_months_propagates() {
        let ledger = sample_ledger();
        let err = AccountForecast::generate_all(
            &ledger,
            0,
            MonthPeriod::new(2024, 6).unwrap(),
            AggregationPolicy::exact(),
        )
        .unwrap_err();
        assert!(err.is_validation());
    }
}
