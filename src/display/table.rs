//! Table rendering for projections and account lists

use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};

use crate::models::Account;
use crate::services::MonthProjection;

/// Render projected months as a table, one row per month
pub fn projection_table(months: &[MonthProjection], currency: &str) -> String {
    let mut builder = Builder::default();
    builder.push_record([
        "Month",
        "Income",
        "Expenses",
        "Transfers In",
        "Transfers Out",
        "Net",
        "Balance",
    ]);

    for month in months {
        builder.push_record([
            month.period.to_string(),
            month.income.format_with_symbol(currency),
            month.expenses.format_with_symbol(currency),
            month.transfers_in.format_with_symbol(currency),
            month.transfers_out.format_with_symbol(currency),
            month.net.format_with_symbol(currency),
            month.balance.format_with_symbol(currency),
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::psql())
        .modify(Columns::new(1..), Alignment::right());
    table.to_string()
}

/// Render accounts with their type, balance behaviour and current balance
pub fn account_table(accounts: &[Account], currency: &str) -> String {
    if accounts.is_empty() {
        return "No accounts found.".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["Name", "Type", "Balance Mode", "Balance"]);

    for account in accounts {
        builder.push_record([
            account.name.clone(),
            account.account_type.to_string(),
            account.classification().to_string(),
            account.current_balance.format_with_symbol(currency),
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::psql())
        .modify(Columns::single(3), Alignment::right());
    table.to_string()
}
