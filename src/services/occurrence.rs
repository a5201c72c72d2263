//! Occurrence evaluator
//!
//! Decides how much a money event posts in a given calendar month. All
//! comparisons are at month granularity: a monthly item starting on the 31st
//! still posts in a 30-day month, and quarterly/custom items repeat every N
//! elapsed months from the start month rather than on calendar quarters.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Money, MoneyEvent, MonthPeriod, Recurrence};

/// How a yearly event contributes to individual months
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YearlyRule {
    /// The full amount posts in the start month of every year
    #[default]
    Anniversary,
    /// One twelfth of the amount posts in every month
    Smoothed,
}

/// Yearly handling for each side of the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationPolicy {
    pub income_yearly: YearlyRule,
    pub expense_yearly: YearlyRule,
}

impl AggregationPolicy {
    /// Overview/trend/forecast default: yearly income smoothed, yearly expenses on anniversary
    pub fn reporting() -> Self {
        Self {
            income_yearly: YearlyRule::Smoothed,
            expense_yearly: YearlyRule::Anniversary,
        }
    }

    /// Calendar-exact handling for both sides
    pub fn exact() -> Self {
        Self {
            income_yearly: YearlyRule::Anniversary,
            expense_yearly: YearlyRule::Anniversary,
        }
    }

    /// Apply one rule to both sides
    pub fn uniform(rule: YearlyRule) -> Self {
        Self {
            income_yearly: rule,
            expense_yearly: rule,
        }
    }
}

impl Default for AggregationPolicy {
    fn default() -> Self {
        Self::reporting()
    }
}

/// Whether the event has started by the end of `period` and not ended before it begins
///
/// One-off events are bounded by their start date alone.
pub fn is_active_in(event: &MoneyEvent, period: &MonthPeriod) -> bool {
    event.is_active_between(period.start_date(), period.end_date())
}

/// Amount the event contributes to `period`, unrounded
pub fn amount_in_month(event: &MoneyEvent, period: &MonthPeriod, yearly: YearlyRule) -> Money {
    if !is_active_in(event, period) {
        return Money::zero();
    }

    let start = MonthPeriod::of(event.start_date);
    let amount = event.amount;

    match event.recurrence {
        Recurrence::Once => {
            if start == *period {
                amount
            } else {
                Money::zero()
            }
        }
        Recurrence::Daily => amount * Decimal::from(period.days_in_month()),
        Recurrence::Weekly => {
            amount * Decimal::from(period.days_in_month()) / Decimal::from(7)
        }
        Recurrence::Monthly => amount,
        Recurrence::Yearly => match yearly {
            YearlyRule::Anniversary => {
                if period.month() == start.month() && period.year() >= start.year() {
                    amount
                } else {
                    Money::zero()
                }
            }
            YearlyRule::Smoothed => amount / Decimal::from(12),
        },
        Recurrence::Quarterly | Recurrence::Custom { .. } => {
            match event.recurrence.month_interval() {
                Some(n) => every_n_months(amount, &start, period, n),
                None => Money::zero(),
            }
        }
    }
}

/// Amount the event contributes to `month`/`year` with anniversary yearly handling
///
/// An out-of-range month contributes nothing.
pub fn occurs_in_month(event: &MoneyEvent, month: u32, year: i32) -> Money {
    match MonthPeriod::new(year, month) {
        Some(period) => amount_in_month(event, &period, YearlyRule::Anniversary),
        None => Money::zero(),
    }
}

/// Total contributed to `period` by a set of events, unrounded
pub fn sum_in_month<'a, I>(events: I, period: &MonthPeriod, yearly: YearlyRule) -> Money
where
    I: IntoIterator<Item = &'a MoneyEvent>,
{
    events
        .into_iter()
        .map(|event| amount_in_month(event, period, yearly))
        .sum()
}

fn every_n_months(amount: Money, start: &MonthPeriod, period: &MonthPeriod, n: u32) -> Money {
    if n == 0 {
        return Money::zero();
    }
    let elapsed = period.months_since(start);
    if elapsed >= 0 && elapsed % n as i32 == 0 {
        amount
    } else {
        Money::zero()
    }
}
