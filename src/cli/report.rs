//! CLI commands for reports

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::LedgerResult;
use crate::reports::{
    BalanceSummary, CategorySummary, FinancialHealth, MonthlySummary, RecurringReport,
};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Income, expenses and net for one month
    Monthly {
        /// Month (1-12), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
        /// Year, defaults to the current year
        #[arg(short, long)]
        year: Option<String>,
    },

    /// Totals for one category
    Category {
        /// Category name (case-insensitive)
        name: String,
    },

    /// Savings rate and health rating
    Health,

    /// Transactions repeating with the same type, category and amount
    Recurring,

    /// Lifetime income, expenses and balance
    Balance,
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
    today: NaiveDate,
) -> LedgerResult<()> {
    let records = storage.transactions.load_all()?;
    let currency = settings.currency.as_str();

    let output = match cmd {
        ReportCommands::Monthly { month, year } => {
            // Unparseable input falls back to the current month like out-of-range input
            let month = month.map(|m| m.trim().parse::<u32>()).transpose();
            let year = year.map(|y| y.trim().parse::<i32>()).transpose();
            let summary = match (month, year) {
                (Ok(month), Ok(year)) => MonthlySummary::generate(&records, month, year, today),
                _ => MonthlySummary::current(&records, today),
            };
            summary.format_terminal(currency)
        }
        ReportCommands::Category { name } => {
            CategorySummary::generate(&records, &name).format_terminal(currency)
        }
        ReportCommands::Health => FinancialHealth::generate(&records).format_terminal(currency),
        ReportCommands::Recurring => RecurringReport::generate(&records).format_terminal(currency),
        ReportCommands::Balance => BalanceSummary::generate(&records).format_terminal(currency),
    };

    print!("{}", output);
    Ok(())
}
