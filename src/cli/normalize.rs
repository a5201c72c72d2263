//! `normalize` command: monthly equivalent of a single amount

use crate::config::Settings;
use crate::error::{CashflowError, CashflowResult};
use crate::models::{Money, Recurrence};
use crate::services::normalize_to_monthly;

/// Compute the line printed by `cashflow normalize`
pub fn format_normalized(amount: &str, kind: &str, currency: &str) -> CashflowResult<String> {
    let amount = Money::parse(amount)
        .map_err(|e| CashflowError::Validation(format!("Invalid amount: {}", e)))?;
    if amount.is_negative() {
        return Err(CashflowError::validation("amount must not be negative"));
    }
    let recurrence =
        Recurrence::parse(kind).map_err(|e| CashflowError::Validation(e.to_string()))?;

    let monthly = normalize_to_monthly(amount, &recurrence);
    Ok(format!(
        "{} {} = {} per month",
        amount.format_with_symbol(currency),
        recurrence.to_string().to_lowercase(),
        monthly.format_with_symbol(currency)
    ))
}

/// Handle the normalize command
pub fn handle_normalize_command(amount: &str, kind: &str, settings: &Settings) -> CashflowResult<()> {
    println!("{}", format_normalized(amount, kind, &settings.currency_symbol)?);
    Ok(())
}
