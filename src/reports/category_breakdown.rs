//! Category Breakdown Report
//!
//! Expense occurrences over a date range, bucketed by category. Every month
//! the range touches is counted in full.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::error::{CashflowError, CashflowResult};
use crate::models::{CategoryId, Money, MonthPeriod};
use crate::services::{amount_in_month, AggregationPolicy};
use crate::storage::{EventFilter, LedgerSource};

/// Spending for one category bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySpending {
    /// `None` for the uncategorized bucket
    pub category_id: Option<CategoryId>,
    pub category_name: String,
    pub amount: Money,
    /// Number of month postings summed into this bucket
    pub occurrences: usize,
    /// Share of the total, 0 when the total is 0
    pub percentage: Decimal,
}

/// Category Breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBreakdown {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Sorted by amount, largest first
    pub categories: Vec<CategorySpending>,
    pub total: Money,
}

impl CategoryBreakdown {
    /// Generate the breakdown for an inclusive date range
    ///
    /// # Errors
    ///
    /// Returns a validation error when `start_date` is after `end_date`.
    pub fn generate<S: LedgerSource + ?Sized>(
        source: &S,
        start_date: NaiveDate,
        end_date: NaiveDate,
        policy: AggregationPolicy,
    ) -> CashflowResult<Self> {
        if start_date > end_date {
            return Err(CashflowError::validation(format!(
                "start date {} is after end date {}",
                start_date, end_date
            )));
        }

        let months = MonthPeriod::spanning(start_date, end_date);
        let filter = EventFilter::all().between(start_date, end_date);
        let expenses = source.expenses(&filter);

        let mut buckets: HashMap<Option<CategoryId>, (Money, usize)> = HashMap::new();
        let mut total = Money::zero();

        for expense in &expenses {
            for period in &months {
                let amount = amount_in_month(&expense.event, period, policy.expense_yearly);
                if amount.is_zero() {
                    continue;
                }
                let entry = buckets
                    .entry(expense.category_id)
                    .or_insert((Money::zero(), 0));
                entry.0 += amount;
                entry.1 += 1;
                total += amount;
            }
        }

        let mut categories: Vec<CategorySpending> = buckets
            .into_iter()
            .map(|(category_id, (amount, occurrences))| CategorySpending {
                category_id,
                category_name: source.category_name(category_id),
                amount: amount.round_currency(),
                occurrences,
                percentage: amount.percentage_of(total),
            })
            .collect();

        categories.sort_by(|a, b| {
            b.amount
                .cmp(&a.amount)
                .then_with(|| a.category_name.cmp(&b.category_name))
        });

        debug!(
            start = %start_date,
            end = %end_date,
            months = months.len(),
            buckets = categories.len(),
            "generated category breakdown"
        );

        Ok(Self {
            start_date,
            end_date,
            categories,
            total: total.round_currency(),
        })
    }

    /// Breakdown for a single calendar month
    pub fn for_month<S: LedgerSource + ?Sized>(
        source: &S,
        period: MonthPeriod,
        policy: AggregationPolicy,
    ) -> CashflowResult<Self> {
        Self::generate(source, period.start_date(), period.end_date(), policy)
    }

    /// Get the largest categories
    pub fn top(&self, limit: usize) -> &[CategorySpending] {
        &self.categories[..limit.min(self.categories.len())]
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str, limit: Option<usize>) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Category Breakdown: {} to {}\n",
            self.start_date, self.end_date
        ));
        output.push_str(&"=".repeat(64));
        output.push('\n');

        if self.categories.is_empty() {
            output.push_str("No expenses in this range.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<30} {:>14} {:>8} {:>8}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(64));
        output.push('\n');

        let rows = match limit {
            Some(n) => self.top(n),
            None => &self.categories[..],
        };
        for row in rows {
            output.push_str(&format!(
                "{:<30} {:>14} {:>8} {:>8}\n",
                crate::display::truncate(&row.category_name, 30),
                row.amount.format_with_symbol(currency),
                row.occurrences,
                format!("{}%", row.percentage)
            ));
        }

        output.push_str(&"-".repeat(64));
        output.push('\n');
        output.push_str(&format!(
            "{:<30} {:>14}\n",
            "TOTAL",
            self.total.format_with_symbol(currency)
        ));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Account, AccountType, Category, Expense, MoneyEvent, Recurrence, UNCATEGORIZED,
    };
    use crate::storage::Ledger;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn monthly(amount: Decimal) -> MoneyEvent {
        MoneyEvent::new(Money::new(amount), Recurrence::Monthly, date(2024, 1, 1))
    }

    fn sample_ledger() -> Ledger {
        let account = Account::new("Checking", AccountType::Checking);
        let housing = Category::new("Housing");
        let food = Category::new("Food");

        let mut ledger = Ledger::new();
        ledger.expenses.push(
            Expense::new(account.id, "Rent", monthly(dec!(1000))).with_category(housing.id),
        );
        ledger.expenses.push(
            Expense::new(account.id, "Groceries", monthly(dec!(400))).with_category(food.id),
        );
        ledger.expenses.push(Expense::new(account.id, "Misc", monthly(dec!(100))));
        ledger.expenses.push(
            Expense::new(
                account.id,
                "Insurance",
                MoneyEvent::new(Money::new(dec!(300)), Recurrence::Quarterly, date(2024, 2, 1)),
            )
            .with_category(housing.id),
        );
        ledger.categories.push(housing);
        ledger.categories.push(food);
        ledger.accounts.push(account);
        ledger
    }

    #[test]
    fn test_buckets_and_order() {
        let ledger = sample_ledger();
        let report = CategoryBreakdown::generate(
            &ledger,
            date(2024, 1, 15),
            date(2024, 3, 10),
            AggregationPolicy::default(),
        )
        .unwrap();

        let names: Vec<&str> = report.categories.iter().map(|c| c.category_name.as_str()).collect();
        assert_eq!(names, vec!["Housing", "Food", UNCATEGORIZED]);
        assert_eq!(report.categories[0].amount, Money::new(dec!(3300)));
        assert_eq!(report.categories[0].occurrences, 4);
        assert_eq!(report.categories[2].category_id, None);
        assert_eq!(report.total, Money::new(dec!(4800)));
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let ledger = sample_ledger();
        let report = CategoryBreakdown::generate(
            &ledger,
            date(2024, 1, 1),
            date(2024, 12, 31),
            AggregationPolicy::default(),
        )
        .unwrap();

        let sum: Decimal = report.categories.iter().map(|c| c.percentage).sum();
        assert!((sum - dec!(100)).abs() <= dec!(0.05), "sum was {sum}");
    }

    #[test]
    fn test_zero_total_gives_zero_percentages() {
        let ledger = sample_ledger();
        let report = CategoryBreakdown::generate(
            &ledger,
            date(2023, 1, 1),
            date(2023, 6, 30),
            AggregationPolicy::default(),
        )
        .unwrap();
        assert!(report.total.is_zero());
        assert!(report.categories.iter().all(|c| c.percentage.is_zero()));

        let empty = CategoryBreakdown::for_month(
            &Ledger::new(),
            MonthPeriod::new(2024, 6).unwrap(),
            AggregationPolicy::default(),
        )
        .unwrap();
        assert!(empty.categories.is_empty());
        assert!(empty.format_terminal("$", None).contains("No expenses"));
    }

    #[test]
    fn test_ties_sorted_by_name() {
        let account = Account::new("Checking", AccountType::Checking);
        let b = Category::new("Bravo");
        let a = Category::new("Alpha");
        let mut ledger = Ledger::new();
        ledger
            .expenses
            .push(Expense::new(account.id, "b", monthly(dec!(50))).with_category(b.id));
        ledger
            .expenses
            .push(Expense::new(account.id, "a", monthly(dec!(50))).with_category(a.id));
        ledger.categories.extend([b, a]);
        ledger.accounts.push(account);

        let report = CategoryBreakdown::for_month(
            &ledger,
            MonthPeriod::new(2024, 5).unwrap(),
            AggregationPolicy::default(),
        )
        .unwrap();
        assert_eq!(report.categories[0].category_name, "Alpha");
        assert_eq!(report.categories[0].percentage, dec!(50));
        assert_eq!(report.top(1).len(), 1);
        assert_eq!(report.top(10).len(), 2);
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let err = CategoryBreakdown::generate(
            &Ledger::new(),
            date(2024, 6, 1),
            date(2024, 5, 1),
            AggregationPolicy::default(),
        )
        .unwrap_err();
        assert!(err.is_validation());
    }
}
