//! Transaction display formatting
//!
//! Renders views as tables. The ID column is the row's position in the full
//! listing, which is what `edit` and `delete` expect.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::Transaction;
use crate::services::ViewRow;

/// Longest description shown in a table cell
const DESCRIPTION_WIDTH: usize = 30;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: usize,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl TransactionRow {
    fn new(row: &ViewRow, currency: &str) -> Self {
        let txn = &row.transaction;
        Self {
            id: row.position,
            date: txn.date.format("%Y-%m-%d").to_string(),
            kind: txn.kind.to_string(),
            category: txn.category.clone(),
            amount: format!("{}{}", currency, txn.amount),
            description: truncate(&txn.description, DESCRIPTION_WIDTH),
        }
    }
}

/// Format a view as a table
pub fn format_transaction_table(rows: &[ViewRow], currency: &str) -> String {
    if rows.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut table = Table::new(rows.iter().map(|row| TransactionRow::new(row, currency)));
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::single(4)).with(Alignment::right()));

    format!("{}\n{} transaction(s)\n", table, rows.len())
}

/// Format one transaction for display
pub fn format_transaction_details(position: usize, txn: &Transaction, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: #{}\n", position));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!("Amount:      {}{}\n", currency, txn.amount));
    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }

    output
}

/// Truncate a string to a maximum number of characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
