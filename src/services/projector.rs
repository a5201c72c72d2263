//! Account projector
//!
//! Walks the months after a reference month for one account and combines
//! income, expense and transfer occurrences into a monthly net flow. Savings
//! and investment accounts carry the balance forward; checking-style accounts
//! report each month's net flow on its own.

use serde::Serialize;
use tracing::debug;

use crate::error::{CashflowError, CashflowResult};
use crate::models::{Account, AccountId, BalanceClassification, Money, MoneyEvent, MonthPeriod};
use crate::storage::{EventFilter, LedgerSource};

use super::occurrence::{sum_in_month, AggregationPolicy, YearlyRule};

/// The schedules that move money in and out of one account
#[derive(Debug, Clone, Default)]
pub struct AccountEvents<'a> {
    pub incomes: Vec<&'a MoneyEvent>,
    pub expenses: Vec<&'a MoneyEvent>,
    pub transfers_in: Vec<&'a MoneyEvent>,
    pub transfers_out: Vec<&'a MoneyEvent>,
}

impl<'a> AccountEvents<'a> {
    /// Collect an account's events from a ledger source
    pub fn for_account<S: LedgerSource + ?Sized>(source: &'a S, account_id: AccountId) -> Self {
        let filter = EventFilter::for_account(account_id);
        let (transfers_in, transfers_out): (Vec<_>, Vec<_>) = source
            .transfers_for(account_id)
            .into_iter()
            .partition(|transfer| transfer.to_account == account_id);

        Self {
            incomes: source.incomes(&filter).into_iter().map(|i| &i.event).collect(),
            expenses: source.expenses(&filter).into_iter().map(|e| &e.event).collect(),
            transfers_in: transfers_in.into_iter().map(|t| &t.event).collect(),
            transfers_out: transfers_out.into_iter().map(|t| &t.event).collect(),
        }
    }

    /// Total number of schedules
    pub fn len(&self) -> usize {
        self.incomes.len() + self.expenses.len() + self.transfers_in.len() + self.transfers_out.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One projected month for an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthProjection {
    pub period: MonthPeriod,
    pub income: Money,
    pub expenses: Money,
    pub transfers_in: Money,
    pub transfers_out: Money,
    /// income - expenses + transfers_in - transfers_out
    pub net: Money,
    /// Running balance for cumulative accounts; equal to `net` for snapshot accounts
    pub balance: Money,
}

/// Longest window, in months, any projection or report walks
pub const MAX_HORIZON_MONTHS: i32 = 1200;

/// Check a month count against the allowed horizon
///
/// # Errors
///
/// Returns a validation error when `months` is less than 1 or more than
/// [`MAX_HORIZON_MONTHS`].
pub fn check_horizon(label: &str, months: i32) -> CashflowResult<u32> {
    if months < 1 {
        return Err(CashflowError::validation(format!(
            "{} must be at least 1 (got {})",
            label, months
        )));
    }
    if months > MAX_HORIZON_MONTHS {
        return Err(CashflowError::validation(format!(
            "{} must be at most {} (got {})",
            label, MAX_HORIZON_MONTHS, months
        )));
    }
    Ok(months.unsigned_abs())
}

/// Error for a window that runs past the supported calendar range
pub(crate) fn beyond_calendar(reference: MonthPeriod, months: i32) -> CashflowError {
    CashflowError::validation(format!(
        "{} months from {} is beyond the supported calendar range",
        months, reference
    ))
}

/// Project an account `months_ahead` months past `reference`
///
/// Month 1 is the month immediately after `reference`. Amounts are summed
/// exactly and rounded to cents per record; the running balance is carried
/// unrounded.
///
/// # Errors
///
/// Returns a validation error when `months_ahead` is outside
/// 1..=[`MAX_HORIZON_MONTHS`] or the window leaves the calendar range.
pub fn project_account(
    account: &Account,
    events: &AccountEvents<'_>,
    months_ahead: i32,
    reference: MonthPeriod,
    policy: AggregationPolicy,
) -> CashflowResult<Vec<MonthProjection>> {
    let count = check_horizon("months ahead", months_ahead)?;
    if reference.checked_offset(months_ahead).is_none() {
        return Err(beyond_calendar(reference, months_ahead));
    }

    let classification = account.classification();
    let mut running = account.current_balance;
    let mut projections = Vec::with_capacity(count as usize);

    for period in reference.following(count) {
        let income = sum_in_month(events.incomes.iter().copied(), &period, policy.income_yearly);
        let expenses =
            sum_in_month(events.expenses.iter().copied(), &period, policy.expense_yearly);
        // Transfers are calendar-exact on both legs.
        let transfers_in = sum_in_month(
            events.transfers_in.iter().copied(),
            &period,
            YearlyRule::Anniversary,
        );
        let transfers_out = sum_in_month(
            events.transfers_out.iter().copied(),
            &period,
            YearlyRule::Anniversary,
        );

        let net = income - expenses + transfers_in - transfers_out;
        let balance = match classification {
            BalanceClassification::Cumulative => {
                running += net;
                running
            }
            BalanceClassification::Snapshot => net,
        };

        projections.push(MonthProjection {
            period,
            income: income.round_currency(),
            expenses: expenses.round_currency(),
            transfers_in: transfers_in.round_currency(),
            transfers_out: transfers_out.round_currency(),
            net: net.round_currency(),
            balance: balance.round_currency(),
        });
    }

    debug!(
        account = %account.id,
        %classification,
        months = months_ahead,
        schedules = events.len(),
        "projected account"
    );

    Ok(projections)
}
