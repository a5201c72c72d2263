//! Dashboard Summary
//!
//! A one-screen snapshot: balances across accounts, the steady-state monthly
//! picture from normalized amounts, and the reference month's overview.

use serde::Serialize;
use tracing::debug;

use super::monthly_overview::MonthlyOverview;
use crate::models::{Money, MonthPeriod};
use crate::services::{monthly_burden, AggregationPolicy};
use crate::storage::{EventFilter, LedgerSource};

/// Dashboard Summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub reference: MonthPeriod,
    pub account_count: usize,
    /// Sum of current balances across every account
    pub total_balance: Money,
    /// Normalized monthly income from every schedule active in the reference month
    pub monthly_income: Money,
    /// Normalized monthly expenses from every schedule active in the reference month
    pub monthly_expenses: Money,
    /// monthly_income - monthly_expenses
    pub typical_net: Money,
    pub recurring_count: usize,
    pub one_off_count: usize,
    pub overview: MonthlyOverview,
}

impl DashboardSummary {
    /// Generate the dashboard as of `reference`
    pub fn generate<S: LedgerSource + ?Sized>(
        source: &S,
        reference: MonthPeriod,
        policy: AggregationPolicy,
    ) -> Self {
        let filter = EventFilter::all().between(reference.start_date(), reference.end_date());
        let incomes = source.incomes(&filter);
        let expenses = source.expenses(&filter);

        let monthly_income = monthly_burden(incomes.iter().map(|i| &i.event));
        let monthly_expenses = monthly_burden(expenses.iter().map(|e| &e.event));

        let (recurring_count, one_off_count) = incomes
            .iter()
            .map(|i| &i.event)
            .chain(expenses.iter().map(|e| &e.event))
            .fold((0, 0), |(recurring, once), event| {
                if event.recurrence.is_recurring() {
                    (recurring + 1, once)
                } else {
                    (recurring, once + 1)
                }
            });

        let total_balance: Money = source.accounts().iter().map(|a| a.current_balance).sum();

        debug!(%reference, recurring_count, one_off_count, "generated dashboard");

        Self {
            reference,
            account_count: source.accounts().len(),
            total_balance: total_balance.round_currency(),
            monthly_income: monthly_income.round_currency(),
            monthly_expenses: monthly_expenses.round_currency(),
            typical_net: (monthly_income - monthly_expenses).round_currency(),
            recurring_count,
            one_off_count,
            overview: MonthlyOverview::generate(source, reference, policy),
        }
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Dashboard: {}\n", self.reference));
        output.push_str(&"=".repeat(50));
        output.push('\n');
        output.push_str(&format!(
            "{:<24} {:>16}\n",
            format!("Balance ({} accounts)", self.account_count),
            self.total_balance.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "{:<24} {:>16}\n",
            "Typical monthly income",
            self.monthly_income.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "{:<24} {:>16}\n",
            "Typical monthly costs",
            self.monthly_expenses.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "{:<24} {:>16}\n",
            "Typical monthly net",
            self.typical_net.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "{:<24} {:>16}\n\n",
            "Schedules",
            format!("{} recurring, {} one-off", self.recurring_count, self.one_off_count)
        ));
        output.push_str(&self.overview.format_terminal(currency));

        output
    }
}
