//! Reports module for the ledger
//!
//! Aggregates over a full load of the active user's transactions: monthly
//! totals, per-category totals, a savings-rate health rating, recurring
//! transactions and the overall balance.

pub mod balance;
pub mod category;
pub mod health;
pub mod monthly;
pub mod recurring;

pub use balance::BalanceSummary;
pub use category::CategorySummary;
pub use health::{FinancialHealth, HealthOutcome, HealthTier};
pub use monthly::MonthlySummary;
pub use recurring::{RecurringGroup, RecurringReport};

/// Income and expense totals over a set of transactions
pub(crate) fn totals<'a>(
    records: impl IntoIterator<Item = &'a crate::models::Transaction>,
) -> (u64, u64) {
    records
        .into_iter()
        .fold((0u64, 0u64), |(income, expense), txn| {
            if txn.is_income() {
                (income.saturating_add(txn.amount), expense)
            } else {
                (income, expense.saturating_add(txn.amount))
            }
        })
}

/// Difference of two totals as a signed value
pub(crate) fn net(income: u64, expense: u64) -> i64 {
    i128::from(income)
        .saturating_sub(i128::from(expense))
        .clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}
