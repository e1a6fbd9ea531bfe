//! Category Summary
//!
//! Totals for one category, matched without regard to case.

use crate::models::Transaction;

use super::totals;

/// Totals for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    /// Category as requested (trimmed)
    pub category: String,
    /// Sum of every matching amount, income and expense alike
    pub total: u64,
    pub income_total: u64,
    pub expense_total: u64,
    pub count: usize,
}

impl CategorySummary {
    /// Sum the transactions whose category matches `category`
    pub fn generate(records: &[Transaction], category: &str) -> Self {
        let matching: Vec<&Transaction> = records
            .iter()
            .filter(|t| t.category_matches(category))
            .collect();
        let (income_total, expense_total) = totals(matching.iter().copied());

        Self {
            category: category.trim().to_string(),
            total: income_total.saturating_add(expense_total),
            income_total,
            expense_total,
            count: matching.len(),
        }
    }

    /// Whether any transaction matched
    pub fn has_transactions(&self) -> bool {
        self.count > 0
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        if !self.has_transactions() {
            return format!(
                "No transactions were found for the '{}' category.\n",
                self.category
            );
        }

        let mut output = format!("Category Summary: {}\n", self.category);
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&format!("{:<16} {:>20}\n", "Transactions:", self.count));
        output.push_str(&format!(
            "{:<16} {:>20}\n",
            "Income:",
            format!("{}{}", currency, self.income_total)
        ));
        output.push_str(&format!(
            "{:<16} {:>20}\n",
            "Expenses:",
            format!("{}{}", currency, self.expense_total)
        ));
        output.push_str(&format!(
            "{:<16} {:>20}\n",
            "Total:",
            format!("{}{}", currency, self.total)
        ));
        output
    }
}
