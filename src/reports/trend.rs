//! Trend Report
//!
//! Income, expenses and savings for the last N months, oldest first.

use serde::Serialize;
use tracing::debug;

use super::monthly_overview::MonthTotals;
use crate::error::CashflowResult;
use crate::models::{Money, MonthPeriod};
use crate::services::projector::beyond_calendar;
use crate::services::{check_horizon, AggregationPolicy};
use crate::storage::LedgerSource;

/// One month of the trend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub period: MonthPeriod,
    /// `YYYY-MM`
    pub label: String,
    pub income: Money,
    pub expenses: Money,
    /// income - expenses
    pub savings: Money,
}

/// Trend Report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendReport {
    pub points: Vec<TrendPoint>,
}

impl TrendReport {
    /// Generate the trend for the `months` months ending with `reference`
    ///
    /// # Errors
    ///
    /// Returns a validation error when `months` is outside the allowed horizon.
    pub fn generate<S: LedgerSource + ?Sized>(
        source: &S,
        months: i32,
        reference: MonthPeriod,
        policy: AggregationPolicy,
    ) -> CashflowResult<Self> {
        let count = check_horizon("trend months", months)?;
        if reference.checked_offset(1 - months).is_none() {
            return Err(beyond_calendar(reference, months));
        }

        let points: Vec<TrendPoint> = reference
            .trailing(count)
            .map(|period| {
                let totals = MonthTotals::compute(source, &period, policy);
                TrendPoint {
                    period,
                    label: period.to_string(),
                    income: totals.income.round_currency(),
                    expenses: totals.expenses.round_currency(),
                    savings: totals.net().round_currency(),
                }
            })
            .collect();

        debug!(%reference, months, "generated trend report");

        Ok(Self { points })
    }

    /// Sum of savings across the trend
    pub fn total_savings(&self) -> Money {
        self.points.iter().map(|p| p.savings).sum()
    }

    /// Average monthly savings, zero for an empty trend
    pub fn average_savings(&self) -> Money {
        if self.points.is_empty() {
            return Money::zero();
        }
        (self.total_savings() / rust_decimal::Decimal::from(self.points.len())).round_currency()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Trend: last {} months\n", self.points.len()));
        output.push_str(&"=".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<10} {:>14} {:>14} {:>14}  {}\n",
            "Month", "Income", "Expenses", "Savings", ""
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        let widest = self
            .points
            .iter()
            .map(|p| p.savings.abs().amount())
            .max()
            .unwrap_or_default();

        for point in &self.points {
            output.push_str(&format!(
                "{:<10} {:>14} {:>14} {:>14}  {}\n",
                point.label,
                point.income.format_with_symbol(currency),
                point.expenses.format_with_symbol(currency),
                point.savings.format_with_symbol(currency),
                crate::display::format_bar(point.savings.amount(), widest, 12)
            ));
        }

        output.push_str(&"-".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<10} {:>44}\n",
            "Average",
            self.average_savings().format_with_symbol(currency)
        ));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, AccountType, Expense, Income, MoneyEvent, Recurrence};
    use crate::storage::Ledger;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_ledger() -> Ledger {
        let account = Account::new("Checking", AccountType::Checking);
        let mut ledger = Ledger::new();
        ledger.incomes.push(Income::new(
            account.id,
            "Salary",
            MoneyEvent::new(Money::new(dec!(3000)), Recurrence::Monthly, date(2024, 1, 1)),
        ));
        ledger.expenses.push(Expense::new(
            account.id,
            "Rent",
            MoneyEvent::new(Money::new(dec!(1200)), Recurrence::Monthly, date(2024, 3, 1)),
        ));
        ledger.accounts.push(account);
        ledger
    }

    #[test]
    fn test_trailing_months_oldest_first() {
        let report = TrendReport::generate(
            &sample_ledger(),
            4,
            MonthPeriod::new(2024, 4).unwrap(),
            AggregationPolicy::default(),
        )
        .unwrap();

        let labels: Vec<&str> = report.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["2024-01", "2024-02", "2024-03", "2024-04"]);
        assert_eq!(report.points[0].savings, Money::new(dec!(3000)));
        assert_eq!(report.points[3].savings, Money::new(dec!(1800)));
        assert_eq!(report.total_savings(), Money::new(dec!(9600)));
        assert_eq!(report.average_savings(), Money::new(dec!(2400)));
    }

    #[test]
    fn test_crosses_year_boundary() {
        let report = TrendReport::generate(
            &Ledger::new(),
            3,
            MonthPeriod::new(2025, 1).unwrap(),
            AggregationPolicy::default(),
        )
        .unwrap();
        assert_eq!(report.points[0].label, "2024-11");
        assert!(report.points.iter().all(|p| p.savings.is_zero()));
    }

    #[test]
    fn test_rejects_out_of_range_months() {
        for months in [0, 2_000_000_000] {
            let err = TrendReport::generate(
                &Ledger::new(),
                months,
                MonthPeriod::new(2025, 1).unwrap(),
                AggregationPolicy::default(),
            )
            .unwrap_err();
            assert!(err.is_validation());
        }
    }
}
