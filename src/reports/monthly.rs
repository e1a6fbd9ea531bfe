//! Monthly Summary
//!
//! Income, expense and net for one calendar month.

use chrono::{Datelike, NaiveDate};

use crate::models::Transaction;

use super::{net, totals};

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 9999;

/// Totals for one month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlySummary {
    pub month: u32,
    pub year: i32,
    pub income_total: u64,
    pub expense_total: u64,
    /// `income_total - expense_total`
    pub net: i64,
    /// Number of transactions in the month
    pub count: usize,
    /// The requested month/year was invalid and today's was used
    pub fell_back: bool,
}

impl MonthlySummary {
    /// Sum the transactions dated in `month`/`year`
    ///
    /// A missing month or year defaults to today's on its own. A month outside
    /// 1-12 or a year outside 1900-9999 selects today's month and year both.
    pub fn generate(
        records: &[Transaction],
        month: Option<u32>,
        year: Option<i32>,
        today: NaiveDate,
    ) -> Self {
        let month = month.unwrap_or(today.month());
        let year = year.unwrap_or(today.year());
        if !(1..=12).contains(&month) || !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Self::current(records, today);
        }
        Self::summarize(records, month, year, false)
    }

    /// Totals for today's month, flagged as a fallback from a bad request
    pub fn current(records: &[Transaction], today: NaiveDate) -> Self {
        Self::summarize(records, today.month(), today.year(), true)
    }

    fn summarize(records: &[Transaction], month: u32, year: i32, fell_back: bool) -> Self {
        let in_month: Vec<&Transaction> = records
            .iter()
            .filter(|t| t.date.month() == month && t.date.year() == year)
            .collect();
        let (income_total, expense_total) = totals(in_month.iter().copied());

        Self {
            month,
            year,
            income_total,
            expense_total,
            net: net(income_total, expense_total),
            count: in_month.len(),
            fell_back,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        if self.fell_back {
            output.push_str("Invalid month/year, using the current month.\n");
        }
        output.push_str(&format!("Monthly Summary for {}/{}\n", self.month, self.year));
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&format!("{:<16} {:>20}\n", "Transactions:", self.count));
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
            "Net total:",
            format!("{}{}", currency, self.net)
        ));

        output
    }
}
