use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use cashflow::cli::{handle_normalize_command, handle_report_command, resolve_reference};
use cashflow::cli::{ReportCommands, ReportContext};
use cashflow::config::{paths::CashflowPaths, settings::Settings};
use cashflow::display::separator;
use cashflow::storage::Ledger;

#[derive(Parser)]
#[command(
    name = "cashflow",
    author = "Kaylee Beyene",
    version,
    about = "Recurring income, expense and transfer projections",
    long_about = "Cashflow reads a ledger of accounts and scheduled incomes, expenses \
                  and transfers, and projects them month by month: overviews, category \
                  breakdowns, trends, forecasts and per-account balance projections."
)]
struct Cli {
    /// Ledger snapshot to read (defaults to <data dir>/data/ledger.json)
    #[arg(long, global = true, env = "CASHFLOW_LEDGER")]
    ledger: Option<PathBuf>,

    /// Month reports are anchored on (YYYY-MM, defaults to the current month)
    #[arg(long, global = true)]
    as_of: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Report(ReportCommands),

    /// Monthly equivalent of an amount (e.g. `normalize 120 weekly`, `normalize 50 custom:2`)
    Normalize {
        /// Amount per occurrence
        amount: String,
        /// once, daily, weekly, monthly, quarterly, yearly or custom:N
        kind: String,
    },

    /// Show current configuration and paths
    Config {
        /// Write the settings file with the current values
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cashflow::logging::init(cli.verbose);

    // Initialize paths and settings
    let paths = CashflowPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Report(cmd)) => {
            let ledger_path = cli.ledger.unwrap_or_else(|| paths.ledger_file());
            let reference = resolve_reference(cli.as_of.as_deref())?;
            debug!(ledger = %ledger_path.display(), %reference, "running report");

            let ledger = Ledger::load(&ledger_path)
                .context("No usable ledger; pass --ledger or set CASHFLOW_LEDGER")?;
            let ctx = ReportContext {
                ledger: &ledger,
                settings: &settings,
                reference,
            };
            handle_report_command(&ctx, cmd)?;
        }
        Some(Commands::Normalize { amount, kind }) => {
            handle_normalize_command(&amount, &kind, &settings)?;
        }
        Some(Commands::Config { init }) => {
            if init {
                settings.save(&paths)?;
                info!(path = %paths.settings_file().display(), "wrote settings");
                println!("Settings written to: {}", paths.settings_file().display());
                println!();
            }
            println!("Cashflow Configuration");
            println!("{}", separator(22));
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Default ledger:   {}", paths.ledger_file().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:        {}", settings.currency_symbol);
            println!("  Forecast months:        {}", settings.default_forecast_months);
            println!("  Trend months:           {}", settings.default_trend_months);
            println!("  Yearly income rule:     {:?}", settings.income_yearly_rule);
            println!("  Yearly expense rule:    {:?}", settings.expense_yearly_rule);
            println!("  Projection yearly rule: {:?}", settings.projection_yearly_rule);
        }
        None => {
            println!("Cashflow - recurring income and expense projections");
            println!();
            println!("Run 'cashflow --help' for usage information.");
        }
    }

    Ok(())
}
