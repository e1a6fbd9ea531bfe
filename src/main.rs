use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};

use ledger::cli::{
    handle_export_command, handle_import_command, handle_report_command,
    handle_transaction_command, ReportCommands, TransactionCommands, ViewArgs,
};
use ledger::config::paths::{validate_user, LedgerPaths};
use ledger::config::settings::Settings;
use ledger::storage::Storage;

#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "File-backed personal income and expense ledger",
    long_about = "Record income and expenses per user in a plain CSV file, \
                  query them by category, date and keyword, import and export \
                  CSV, and see monthly, category and savings reports."
)]
struct Cli {
    /// User whose ledger to open (defaults to the configured default user)
    #[arg(short, long, global = true, env = "LEDGER_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Transaction(TransactionCommands),

    /// Append the valid rows of a CSV file
    Import {
        /// Path to a .csv file with amount, category, description, date and type columns
        file: PathBuf,
    },

    /// Write the (optionally filtered) transactions to <DIR>/<user>_transactions.csv
    Export {
        /// Existing directory to write into
        dir: PathBuf,
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Reports over all transactions
    #[command(subcommand)]
    Report(ReportCommands),

    /// Show recent audit log entries
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Include entries of every user
        #[arg(long)]
        all_users: bool,
    },

    /// Show or change configuration
    Config {
        /// User opened when --user is not given
        #[arg(long)]
        default_user: Option<String>,
        /// Currency label shown next to amounts
        #[arg(long)]
        currency: Option<String>,
        /// Record mutations in the audit log
        #[arg(long)]
        audit: Option<bool>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let today = Local::now().date_naive();

    let Some(command) = cli.command else {
        println!("ledger - personal income and expense ledger");
        println!();
        println!("Run 'ledger --help' for usage information.");
        return Ok(());
    };

    let open = || -> Result<Storage> {
        let user = settings.resolve_user(cli.user.clone())?;
        Ok(Storage::open(paths.clone(), &user)?.with_audit(settings.audit_enabled))
    };

    match command {
        Commands::Transaction(cmd) => {
            handle_transaction_command(&open()?, &settings, cmd, today)?;
        }
        Commands::Import { file } => {
            handle_import_command(&open()?, &file)?;
        }
        Commands::Export { dir, view } => {
            handle_export_command(&open()?, &dir, &view, today)?;
        }
        Commands::Report(cmd) => {
            handle_report_command(&open()?, &settings, cmd, today)?;
        }
        Commands::History { limit, all_users } => {
            let storage = open()?;
            let filter = if all_users { None } else { Some(storage.user()) };
            let entries = storage.audit().read_recent(limit, filter)?;
            if entries.is_empty() {
                println!("No history recorded.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        Commands::Config {
            default_user,
            currency,
            audit,
        } => {
            let mut settings = settings.clone();
            let changed = default_user.is_some() || currency.is_some() || audit.is_some();
            if let Some(user) = default_user {
                validate_user(&user)?;
                settings.default_user = Some(user);
            }
            if let Some(currency) = currency {
                settings.currency = currency;
            }
            if let Some(audit) = audit {
                settings.audit_enabled = audit;
            }
            if changed {
                settings.save(&paths)?;
                println!("Settings saved.");
                println!();
            }

            println!("Ledger Configuration");
            println!("====================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Users directory:  {}", paths.users_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!(
                "  Default user:   {}",
                settings.default_user.as_deref().unwrap_or("(none)")
            );
            println!("  Currency:       {}", settings.currency);
            println!("  Audit enabled:  {}", settings.audit_enabled);
        }
    }

    Ok(())
}
