//! CSV Export functionality
//!
//! Writes report results as CSV. Amounts are rounded to cents and written
//! without a currency symbol so spreadsheets read them as numbers.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::error::{CashflowError, CashflowResult};
use crate::models::Money;
use crate::reports::{
    AccountForecast, CategoryBreakdown, DashboardSummary, ForecastReport, MonthlyOverview,
    TrendReport,
};

/// A report that can be written as CSV rows
pub trait CsvReport {
    fn csv_header(&self) -> Vec<&'static str>;

    fn csv_rows(&self) -> Vec<Vec<String>>;
}

/// Write a report as CSV to any writer
pub fn write_csv<R, W>(report: &R, writer: W) -> CashflowResult<()>
where
    R: CsvReport + ?Sized,
    W: Write,
{
    let mut csv = ::csv::Writer::from_writer(writer);
    csv.write_record(report.csv_header())?;
    for row in report.csv_rows() {
        csv.write_record(&row)?;
    }
    csv.flush()
        .map_err(|e| CashflowError::Export(format!("Failed to flush CSV: {}", e)))?;
    Ok(())
}

/// Write a report as CSV to a file, creating parent directories
pub fn export_to_file<R>(report: &R, path: &Path) -> CashflowResult<()>
where
    R: CsvReport + ?Sized,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            CashflowError::Export(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let file = File::create(path).map_err(|e| {
        CashflowError::Export(format!("Failed to create {}: {}", path.display(), e))
    })?;
    write_csv(report, file)
}

fn amount(money: Money) -> String {
    money.round_currency().amount().to_string()
}

impl CsvReport for MonthlyOverview {
    fn csv_header(&self) -> Vec<&'static str> {
        vec![
            "Month",
            "Income",
            "Expenses",
            "Net",
            "Savings Rate",
            "Income Count",
            "Expense Count",
        ]
    }

    fn csv_rows(&self) -> Vec<Vec<String>> {
        vec![vec![
            self.period.to_string(),
            amount(self.total_income),
            amount(self.total_expenses),
            amount(self.net),
            self.savings_rate.to_string(),
            self.income_count.to_string(),
            self.expense_count.to_string(),
        ]]
    }
}

impl CsvReport for CategoryBreakdown {
    fn csv_header(&self) -> Vec<&'static str> {
        vec!["Start Date", "End Date", "Category", "Amount", "Count", "Percentage"]
    }

    fn csv_rows(&self) -> Vec<Vec<String>> {
        self.categories
            .iter()
            .map(|row| {
                vec![
                    self.start_date.to_string(),
                    self.end_date.to_string(),
                    row.category_name.clone(),
                    amount(row.amount),
                    row.occurrences.to_string(),
                    row.percentage.to_string(),
                ]
            })
            .collect()
    }
}

impl CsvReport for TrendReport {
    fn csv_header(&self) -> Vec<&'static str> {
        vec!["Month", "Income", "Expenses", "Savings"]
    }

    fn csv_rows(&self) -> Vec<Vec<String>> {
        self.points
            .iter()
            .map(|p| {
                vec![
                    p.label.clone(),
                    amount(p.income),
                    amount(p.expenses),
                    amount(p.savings),
                ]
            })
            .collect()
    }
}

impl CsvReport for ForecastReport {
    fn csv_header(&self) -> Vec<&'static str> {
        vec!["Month", "Income", "Expenses", "Net"]
    }

    fn csv_rows(&self) -> Vec<Vec<String>> {
        let mut rows: Vec<Vec<String>> = self
            .months
            .iter()
            .map(|m| {
                vec![
                    m.period.to_string(),
                    amount(m.income),
                    amount(m.expenses),
                    amount(m.net),
                ]
            })
            .collect();
        rows.push(vec![
            "TOTAL".to_string(),
            amount(self.projected_income),
            amount(self.projected_expenses),
            amount(self.projected_balance),
        ]);
        rows
    }
}

impl CsvReport for AccountForecast {
    fn csv_header(&self) -> Vec<&'static str> {
        vec![
            "Account",
            "Month",
            "Income",
            "Expenses",
            "Transfers In",
            "Transfers Out",
            "Net",
            "Balance",
        ]
    }

    fn csv_rows(&self) -> Vec<Vec<String>> {
        self.months
            .iter()
            .map(|m| {
                vec![
                    self.account_name.clone(),
                    m.period.to_string(),
                    amount(m.income),
                    amount(m.expenses),
                    amount(m.transfers_in),
                    amount(m.transfers_out),
                    amount(m.net),
                    amount(m.balance),
                ]
            })
            .collect()
    }
}

impl CsvReport for [AccountForecast] {
    fn csv_header(&self) -> Vec<&'static str> {
        self.first()
            .map(|f| f.csv_header())
            .unwrap_or_else(|| vec!["Account", "Month", "Net", "Balance"])
    }

    fn csv_rows(&self) -> Vec<Vec<String>> {
        self.iter().flat_map(|f| f.csv_rows()).collect()
    }
}

impl CsvReport for DashboardSummary {
    fn csv_header(&self) -> Vec<&'static str> {
        vec!["Metric", "Value"]
    }

    fn csv_rows(&self) -> Vec<Vec<String>> {
        let pairs = [
            ("Month", self.reference.to_string()),
            ("Accounts", self.account_count.to_string()),
            ("Total Balance", amount(self.total_balance)),
            ("Typical Monthly Income", amount(self.monthly_income)),
            ("Typical Monthly Expenses", amount(self.monthly_expenses)),
            ("Typical Monthly Net", amount(self.typical_net)),
            ("Recurring Schedules", self.recurring_count.to_string()),
            ("One-off Schedules", self.one_off_count.to_string()),
            ("Month Income", amount(self.overview.total_income)),
            ("Month Expenses", amount(self.overview.total_expenses)),
            ("Month Net", amount(self.overview.net)),
        ];
        pairs
            .into_iter()
            .map(|(metric, value)| vec![metric.to_string(), value])
            .collect()
    }
}
