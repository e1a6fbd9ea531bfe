//! Recurring Transactions
//!
//! Finds transactions that repeat with the same type, category and amount.

use std::collections::HashMap;

use crate::models::{Transaction, TransactionType};

/// One repeated (type, category, amount) combination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurringGroup {
    pub kind: TransactionType,
    /// Category as first seen in the ledger
    pub category: String,
    pub amount: u64,
    pub count: usize,
}

/// All repeated combinations, in order of first appearance
#[derive(Debug, Clone, Default)]
pub struct RecurringReport {
    pub groups: Vec<RecurringGroup>,
}

impl RecurringReport {
    /// Group by type, category (ignoring case) and amount; keep groups seen more than once
    pub fn generate(records: &[Transaction]) -> Self {
        let mut index: HashMap<(TransactionType, String, u64), usize> = HashMap::new();
        let mut groups: Vec<RecurringGroup> = Vec::new();

        for txn in records {
            let key = (txn.kind, txn.category.to_lowercase(), txn.amount);
            match index.get(&key) {
                Some(&idx) => groups[idx].count += 1,
                None => {
                    index.insert(key, groups.len());
                    groups.push(RecurringGroup {
                        kind: txn.kind,
                        category: txn.category.clone(),
                        amount: txn.amount,
                        count: 1,
                    });
                }
            }
        }

        groups.retain(|g| g.count > 1);
        Self { groups }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        if self.is_empty() {
            return "No recurring transactions found.\n".to_string();
        }

        let mut output = String::from("Recurring Transactions\n");
        output.push_str(&"=".repeat(40));
        output.push('\n');
        for group in &self.groups {
            output.push_str(&format!(
                "{} of {}{} in category '{}' occurred {} times\n",
                group.kind, currency, group.amount, group.category, group.count
            ));
        }
        output
    }
}
