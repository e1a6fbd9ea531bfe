//! Balance Summary
//!
//! Lifetime income, expense and the resulting balance.

use crate::models::Transaction;

use super::{net, totals};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceSummary {
    pub income_total: u64,
    pub expense_total: u64,
    pub balance: i64,
    pub count: usize,
}

impl BalanceSummary {
    pub fn generate(records: &[Transaction]) -> Self {
        let (income_total, expense_total) = totals(records);
        Self {
            income_total,
            expense_total,
            balance: net(income_total, expense_total),
            count: records.len(),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::from("Balance Summary\n");
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&format!(
            "{:<16} {:>20}\n",
            "Total income:",
            format!("{}{}", currency, self.income_total)
        ));
        output.push_str(&format!(
            "{:<16} {:>20}\n",
            "Total expenses:",
            format!("{}{}", currency, self.expense_total)
        ));
        output.push_str(&format!(
            "{:<16} {:>20}\n",
            "Balance:",
            format!("{}{}", currency, self.balance)
        ));
        output
    }
}
