//! Transaction CLI commands
//!
//! Add, list, edit, delete and reset for the active user's ledger.

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use crate::config::settings::Settings;
use crate::display::{format_transaction_details, format_transaction_table};
use crate::error::LedgerResult;
use crate::models::{parse_type, TransactionType};
use crate::services::{
    NewTransaction, SortDirection, SortKey, TransactionService, TransactionView, ViewQuery,
};
use crate::storage::Storage;

/// Filters shared by `list` and `export`
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Only this category (case-insensitive)
    #[arg(short, long)]
    pub category: Option<String>,
    /// Start date (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub from: Option<String>,
    /// End date (YYYY-MM-DD), inclusive; defaults to today when --from is set
    #[arg(long)]
    pub to: Option<String>,
    /// Keep rows where any field contains this text
    #[arg(short, long)]
    pub search: Option<String>,
    /// Sort by this field
    #[arg(long, value_enum)]
    pub sort: Option<SortKey>,
    /// Sort order
    #[arg(long, value_enum, default_value = "asc")]
    pub order: SortDirection,
}

impl ViewArgs {
    pub fn to_query(&self) -> ViewQuery {
        ViewQuery {
            category: self.category.clone(),
            from: self.from.clone(),
            to: self.to.clone(),
            search: self.search.clone(),
            sort: self.sort.map(|key| (key, self.order)),
        }
    }

    /// Load the full listing and narrow it
    pub fn build_view(&self, storage: &Storage, today: NaiveDate) -> LedgerResult<TransactionView> {
        let mut view = TransactionView::new(storage.transactions.load_all()?);
        self.to_query().apply(&mut view, today)?;
        Ok(view)
    }
}

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Record income or an expense
    Add {
        /// income or expense
        #[arg(value_parser = parse_type)]
        kind: TransactionType,
        /// Whole amount, greater than zero
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category (letters only, 3-20 characters)
        category: String,
        /// Free-form description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(long, default_value = "")]
        date: String,
    },

    /// List transactions
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Edit a transaction by its ID from `list`
    Edit {
        /// Transaction ID
        id: usize,
        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// New type
        #[arg(long = "type", value_parser = parse_type, conflicts_with = "toggle_type")]
        kind: Option<TransactionType>,
        /// Switch between income and expense
        #[arg(long)]
        toggle_type: bool,
    },

    /// Delete a transaction by its ID from `list`
    #[command(alias = "rm")]
    Delete {
        /// Transaction ID
        id: usize,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Delete every transaction of the active user
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
    today: NaiveDate,
) -> LedgerResult<()> {
    let service = TransactionService::new(storage);
    let currency = settings.currency.as_str();

    match cmd {
        TransactionCommands::Add {
            kind,
            amount,
            category,
            description,
            date,
        } => {
            let input = NewTransaction {
                kind,
                amount,
                category,
                description,
                date,
            };
            let (position, txn) = service.add(input, today)?;

            println!("Added transaction #{}", position);
            print!("{}", format_transaction_details(position, &txn, currency));
        }

        TransactionCommands::List { view } => {
            let view = view.build_view(storage, today)?;
            print!("{}", format_transaction_table(view.rows(), currency));
        }

        TransactionCommands::Edit {
            id,
            amount,
            category,
            description,
            date,
            kind,
            toggle_type,
        } => {
            let mut editor = service.edit(id)?;

            if let Some(amount) = amount {
                editor.change_amount(&amount)?;
            }
            if let Some(category) = category {
                editor.change_category(&category)?;
            }
            if let Some(description) = description {
                editor.edit_description(&description);
            }
            if let Some(date) = date {
                editor.change_date(&date)?;
            }
            if let Some(kind) = kind {
                editor.set_type(kind);
            }
            if toggle_type {
                editor.toggle_type();
            }

            if !editor.is_dirty() {
                println!("Nothing to change for transaction #{}", id);
                return Ok(());
            }

            let saved = editor.save()?;
            println!("Updated transaction #{}", id);
            print!("{}", format_transaction_details(id, &saved, currency));
        }

        TransactionCommands::Delete { id, force } => {
            if !force {
                let editor = service.edit(id)?;
                println!("About to delete transaction:");
                print!("{}", format_transaction_details(id, editor.original(), currency));
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let deleted = service.delete(id)?;
            println!("Deleted transaction #{} ({})", id, deleted);
        }

        TransactionCommands::Reset { force } => {
            if !force {
                let count = service.list()?.len();
                println!(
                    "About to delete all {} transaction(s) of '{}'.",
                    count,
                    storage.user()
                );
                println!("Use --force to confirm");
                return Ok(());
            }

            let removed = service.reset()?;
            println!("Removed {} transaction(s)", removed);
        }
    }

    Ok(())
}
