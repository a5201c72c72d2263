//! CLI commands for reports
//!
//! Each command prints a terminal rendering, or writes CSV when `--output`
//! is given.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use tracing::info;

use super::{parse_date, parse_period};
use crate::config::Settings;
use crate::display::account_table;
use crate::error::{CashflowError, CashflowResult};
use crate::export::{export_to_file, CsvReport};
use crate::models::MonthPeriod;
use crate::reports::{
    AccountForecast, CategoryBreakdown, DashboardSummary, ForecastReport, MonthlyOverview,
    TrendReport,
};
use crate::storage::Ledger;

/// Everything a report command needs
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub ledger: &'a Ledger,
    pub settings: &'a Settings,
    /// The "current" month reports are anchored on
    pub reference: MonthPeriod,
}

impl ReportContext<'_> {
    fn currency(&self) -> &str {
        &self.settings.currency_symbol
    }
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Income, expenses and savings rate for one month
    Overview {
        /// Month to report on (YYYY-MM, defaults to the reference month)
        #[arg(short, long)]
        period: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Expenses by category over a date range
    Breakdown {
        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(short, long)]
        end: Option<String>,

        /// Month to report on (alternative to start/end)
        #[arg(short, long)]
        period: Option<String>,

        /// Show top N categories only
        #[arg(long)]
        top: Option<usize>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Income, expenses and savings for the last N months
    Trend {
        /// Number of months, including the reference month
        #[arg(short, long, allow_negative_numbers = true)]
        months: Option<i32>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Projected income and expenses for the next N months
    Forecast {
        /// Number of months after the reference month
        #[arg(short, long, allow_negative_numbers = true)]
        months: Option<i32>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Month-by-month balance projection for one account, or all of them
    #[command(alias = "projection")]
    Project {
        /// Account name or ID (omit to project every account)
        account: Option<String>,

        /// Number of months after the reference month
        #[arg(short, long, allow_negative_numbers = true)]
        months: Option<i32>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Balances, typical month and the reference month at a glance
    Dashboard {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List accounts in the ledger
    Accounts,
}

/// Handle report commands
pub fn handle_report_command(ctx: &ReportContext<'_>, cmd: ReportCommands) -> CashflowResult<()> {
    match cmd {
        ReportCommands::Overview { period, output } => handle_overview(ctx, period, output),
        ReportCommands::Breakdown {
            start,
            end,
            period,
            top,
            output,
        } => handle_breakdown(ctx, start, end, period, top, output),
        ReportCommands::Trend { months, output } => handle_trend(ctx, months, output),
        ReportCommands::Forecast { months, output } => handle_forecast(ctx, months, output),
        ReportCommands::Project {
            account,
            months,
            output,
        } => handle_project(ctx, account, months, output),
        ReportCommands::Dashboard { output } => handle_dashboard(ctx, output),
        ReportCommands::Accounts => {
            println!("{}", account_table(&ctx.ledger.accounts, ctx.currency()));
            Ok(())
        }
    }
}

fn handle_overview(
    ctx: &ReportContext<'_>,
    period: Option<String>,
    output: Option<PathBuf>,
) -> CashflowResult<()> {
    let period = match period {
        Some(p) => parse_period(&p)?,
        None => ctx.reference,
    };

    let report =
        MonthlyOverview::generate(ctx.ledger, period, ctx.settings.aggregation_policy());

    match output {
        Some(path) => write_export(&report, &path, "Monthly overview"),
        None => {
            println!("{}", report.format_terminal(ctx.currency()));
            Ok(())
        }
    }
}

fn handle_breakdown(
    ctx: &ReportContext<'_>,
    start: Option<String>,
    end: Option<String>,
    period: Option<String>,
    top: Option<usize>,
    output: Option<PathBuf>,
) -> CashflowResult<()> {
    let (start_date, end_date) = if let Some(p) = period {
        let period = parse_period(&p)?;
        (period.start_date(), period.end_date())
    } else {
        let start_date = match start {
            Some(s) => parse_date(&s, "start")?,
            None => ctx.reference.start_date(),
        };
        let end_date = match end {
            Some(e) => parse_date(&e, "end")?,
            None => ctx.reference.end_date(),
        };
        (start_date, end_date)
    };

    let report = CategoryBreakdown::generate(
        ctx.ledger,
        start_date,
        end_date,
        ctx.settings.aggregation_policy(),
    )?;

    match output {
        Some(path) => write_export(&report, &path, "Category breakdown"),
        None => {
            println!("{}", report.format_terminal(ctx.currency(), top));
            Ok(())
        }
    }
}

fn handle_trend(
    ctx: &ReportContext<'_>,
    months: Option<i32>,
    output: Option<PathBuf>,
) -> CashflowResult<()> {
    let months = months.unwrap_or_else(|| months_setting(ctx.settings.default_trend_months));
    let report = TrendReport::generate(
        ctx.ledger,
        months,
        ctx.reference,
        ctx.settings.aggregation_policy(),
    )?;

    match output {
        Some(path) => write_export(&report, &path, "Trend report"),
        None => {
            println!("{}", report.format_terminal(ctx.currency()));
            Ok(())
        }
    }
}

fn handle_forecast(
    ctx: &ReportContext<'_>,
    months: Option<i32>,
    output: Option<PathBuf>,
) -> CashflowResult<()> {
    let months = months.unwrap_or_else(|| months_setting(ctx.settings.default_forecast_months));
    let report = ForecastReport::generate(
        ctx.ledger,
        months,
        ctx.reference,
        ctx.settings.aggregation_policy(),
    )?;

    match output {
        Some(path) => write_export(&report, &path, "Forecast"),
        None => {
            println!("{}", report.format_terminal(ctx.currency()));
            Ok(())
        }
    }
}

fn handle_project(
    ctx: &ReportContext<'_>,
    account: Option<String>,
    months: Option<i32>,
    output: Option<PathBuf>,
) -> CashflowResult<()> {
    let months = months.unwrap_or_else(|| months_setting(ctx.settings.default_forecast_months));
    let policy = ctx.settings.projection_policy();

    let forecasts = match account {
        Some(identifier) => {
            let account = ctx
                .ledger
                .find_account(&identifier)
                .ok_or_else(|| CashflowError::account_not_found(identifier.as_str()))?;
            vec![AccountForecast::generate(
                ctx.ledger,
                account,
                months,
                ctx.reference,
                policy,
            )?]
        }
        None => AccountForecast::generate_all(ctx.ledger, months, ctx.reference, policy)?,
    };

    match output {
        Some(path) => write_export(forecasts.as_slice(), &path, "Account projection"),
        None => {
            if forecasts.is_empty() {
                println!("No accounts found.");
            }
            for forecast in &forecasts {
                println!("{}", forecast.format_terminal(ctx.currency()));
            }
            Ok(())
        }
    }
}

fn handle_dashboard(ctx: &ReportContext<'_>, output: Option<PathBuf>) -> CashflowResult<()> {
    let report =
        DashboardSummary::generate(ctx.ledger, ctx.reference, ctx.settings.aggregation_policy());

    match output {
        Some(path) => write_export(&report, &path, "Dashboard"),
        None => {
            println!("{}", report.format_terminal(ctx.currency()));
            Ok(())
        }
    }
}

fn write_export<R: CsvReport + ?Sized>(report: &R, path: &Path, label: &str) -> CashflowResult<()> {
    export_to_file(report, path)?;
    info!(path = %path.display(), "wrote CSV export");
    println!("{} exported to: {}", label, path.display());
    Ok(())
}

fn months_setting(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
