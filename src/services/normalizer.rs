//! Monthly normalizer
//!
//! Converts any recurrence into a "typical month" figure for steady-state
//! budgeting displays. This is a rate approximation with fixed factors; the
//! exact amount posting in a given month comes from
//! [`super::occurrence::amount_in_month`].

use rust_decimal::Decimal;

use crate::models::{Money, MoneyEvent, Recurrence};

/// Days counted per month for daily items
pub const DAYS_PER_MONTH: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// Weeks counted per month for weekly items (4.33)
pub const WEEKS_PER_MONTH: Decimal = Decimal::from_parts(433, 0, 0, false, 2);

/// Monthly-equivalent amount for a recurrence
///
/// One-off amounts have no steady-state monthly equivalent and normalize to
/// zero, as does a custom recurrence with a zero interval.
pub fn normalize_to_monthly(amount: Money, recurrence: &Recurrence) -> Money {
    match recurrence {
        Recurrence::Once => Money::zero(),
        Recurrence::Daily => amount * DAYS_PER_MONTH,
        Recurrence::Weekly => amount * WEEKS_PER_MONTH,
        Recurrence::Monthly => amount,
        Recurrence::Quarterly => amount / Decimal::from(3),
        Recurrence::Yearly => amount / Decimal::from(12),
        Recurrence::Custom { interval } => amount
            .checked_div(Decimal::from(*interval))
            .unwrap_or_default(),
    }
}

/// Monthly-equivalent amount of an event's schedule
pub fn normalize_event(event: &MoneyEvent) -> Money {
    normalize_to_monthly(event.amount, &event.recurrence)
}

/// Sum of monthly equivalents across events
pub fn monthly_burden<'a, I>(events: I) -> Money
where
    I: IntoIterator<Item = &'a MoneyEvent>,
{
    events.into_iter().map(normalize_event).sum()
}
