//! Forecast Report
//!
//! Projected income and expenses for the N months after a reference month,
//! across every account.

use serde::Serialize;
use tracing::debug;

use super::monthly_overview::MonthTotals;
use crate::error::CashflowResult;
use crate::models::{Money, MonthPeriod};
use crate::services::projector::beyond_calendar;
use crate::services::{check_horizon, AggregationPolicy};
use crate::storage::LedgerSource;

/// One forecast month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastMonth {
    pub period: MonthPeriod,
    pub income: Money,
    pub expenses: Money,
    /// income - expenses
    pub net: Money,
}

/// Forecast Report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastReport {
    /// Month the forecast is projected from (not included)
    pub reference: MonthPeriod,
    pub months: Vec<ForecastMonth>,
    pub projected_income: Money,
    pub projected_expenses: Money,
    /// projected_income - projected_expenses
    pub projected_balance: Money,
}

impl ForecastReport {
    /// Generate a forecast for the `months` months following `reference`
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
        let count = check_horizon("forecast months", months)?;
        if reference.checked_offset(months).is_none() {
            return Err(beyond_calendar(reference, months));
        }

        let mut income_total = Money::zero();
        let mut expense_total = Money::zero();
        let mut detail = Vec::with_capacity(count as usize);

        for period in reference.following(count) {
            let totals = MonthTotals::compute(source, &period, policy);
            income_total += totals.income;
            expense_total += totals.expenses;
            detail.push(ForecastMonth {
                period,
                income: totals.income.round_currency(),
                expenses: totals.expenses.round_currency(),
                net: totals.net().round_currency(),
            });
        }

        debug!(%reference, months, "generated forecast report");

        Ok(Self {
            reference,
            months: detail,
            projected_income: income_total.round_currency(),
            projected_expenses: expense_total.round_currency(),
            projected_balance: (income_total - expense_total).round_currency(),
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Forecast: {} months after {}\n",
            self.months.len(),
            self.reference
        ));
        output.push_str(&"=".repeat(56));
        output.push('\n');
        output.push_str(&format!(
            "{:<10} {:>14} {:>14} {:>14}\n",
            "Month", "Income", "Expenses", "Net"
        ));
        output.push_str(&"-".repeat(56));
        output.push('\n');

        for month in &self.months {
            output.push_str(&format!(
                "{:<10} {:>14} {:>14} {:>14}\n",
                month.period.to_string(),
                month.income.format_with_symbol(currency),
                month.expenses.format_with_symbol(currency),
                month.net.format_with_symbol(currency)
            ));
        }

        output.push_str(&"-".repeat(56));
        output.push('\n');
        output.push_str(&format!(
            "{:<10} {:>14} {:>14} {:>14}\n",
            "TOTAL",
            self.projected_income.format_with_symbol(currency),
            self.projected_expenses.format_with_symbol(currency),
            self.projected_balance.format_with_symbol(currency)
        ));

        output
    }
}
