//! Monthly Overview Report
//!
//! Income, expenses, net flow and savings rate for one calendar month across
//! every account. Transfers move money between the user's own accounts and
//! are left out.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::models::{Money, MonthPeriod};
use crate::services::{amount_in_month, AggregationPolicy};
use crate::storage::{EventFilter, LedgerSource};

/// Unrounded totals for one month
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct MonthTotals {
    pub income: Money,
    pub expenses: Money,
    pub income_count: usize,
    pub expense_count: usize,
}

impl MonthTotals {
    pub(crate) fn compute<S: LedgerSource + ?Sized>(
        source: &S,
        period: &MonthPeriod,
        policy: AggregationPolicy,
    ) -> Self {
        let filter = EventFilter::all().between(period.start_date(), period.end_date());
        let mut totals = Self::default();

        for income in source.incomes(&filter) {
            let amount = amount_in_month(&income.event, period, policy.income_yearly);
            if !amount.is_zero() {
                totals.income += amount;
                totals.income_count += 1;
            }
        }

        for expense in source.expenses(&filter) {
            let amount = amount_in_month(&expense.event, period, policy.expense_yearly);
            if !amount.is_zero() {
                totals.expenses += amount;
                totals.expense_count += 1;
            }
        }

        totals
    }

    pub(crate) fn net(&self) -> Money {
        self.income - self.expenses
    }
}

/// Monthly Overview
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyOverview {
    pub period: MonthPeriod,
    pub total_income: Money,
    pub total_expenses: Money,
    /// total_income - total_expenses
    pub net: Money,
    /// Net as a percentage of income; zero when there is no income
    pub savings_rate: Decimal,
    /// Number of incomes posting this month
    pub income_count: usize,
    /// Number of expenses posting this month
    pub expense_count: usize,
}

impl MonthlyOverview {
    /// Generate the overview for one month
    pub fn generate<S: LedgerSource + ?Sized>(
        source: &S,
        period: MonthPeriod,
        policy: AggregationPolicy,
    ) -> Self {
        let totals = MonthTotals::compute(source, &period, policy);
        let net = totals.net();

        debug!(
            %period,
            incomes = totals.income_count,
            expenses = totals.expense_count,
            "generated monthly overview"
        );

        Self {
            period,
            total_income: totals.income.round_currency(),
            total_expenses: totals.expenses.round_currency(),
            net: net.round_currency(),
            savings_rate: net.percentage_of(totals.income),
            income_count: totals.income_count,
            expense_count: totals.expense_count,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Monthly Overview: {}\n", self.period));
        output.push_str(&"=".repeat(50));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>16} {:>10}\n",
            "Income",
            self.total_income.format_with_symbol(currency),
            format!("({})", self.income_count)
        ));
        output.push_str(&format!(
            "{:<20} {:>16} {:>10}\n",
            "Expenses",
            self.total_expenses.format_with_symbol(currency),
            format!("({})", self.expense_count)
        ));
        output.push_str(&"-".repeat(50));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>16}\n",
            "Net",
            self.net.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "{:<20} {:>16}\n",
            "Savings Rate",
            format!("{}%", self.savings_rate)
        ));

        output
    }
}
