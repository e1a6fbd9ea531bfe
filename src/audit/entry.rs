//! Audit entry data structures
//!
//! Defines the operations that change a ledger and the shape of the line
//! written for each of them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Transaction;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Transaction was added by hand
    Create,
    /// Transaction was edited
    Update,
    /// Transaction was deleted
    Delete,
    /// Rows were imported from a CSV file
    Import,
    /// Every transaction was removed
    Reset,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
            Operation::Import => write!(f, "IMPORT"),
            Operation::Reset => write!(f, "RESET"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Owner of the ledger that changed
    pub user: String,

    /// 1-based position of the affected transaction at the time of the change
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,

    /// Transaction before the operation (updates/deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// Transaction after the operation (creates/updates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Human-readable summary of what changed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn new(operation: Operation, user: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            user: user.to_string(),
            position: None,
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    /// Entry for a newly appended transaction
    pub fn create(user: &str, position: usize, txn: &Transaction) -> Self {
        Self {
            position: Some(position),
            after: serde_json::to_value(txn).ok(),
            ..Self::new(Operation::Create, user)
        }
    }

    /// Entry for an edited transaction
    pub fn update(
        user: &str,
        position: usize,
        before: &Transaction,
        after: &Transaction,
        diff_summary: Option<String>,
    ) -> Self {
        Self {
            position: Some(position),
            before: serde_json::to_value(before).ok(),
            after: serde_json::to_value(after).ok(),
            diff_summary,
            ..Self::new(Operation::Update, user)
        }
    }

    /// Entry for a deleted transaction
    pub fn delete(user: &str, position: usize, txn: &Transaction) -> Self {
        Self {
            position: Some(position),
            before: serde_json::to_value(txn).ok(),
            ..Self::new(Operation::Delete, user)
        }
    }

    /// Entry for a CSV import
    pub fn import(user: &str, source: &str, imported: usize, skipped: usize) -> Self {
        Self {
            diff_summary: Some(format!(
                "{} imported, {} skipped from {}",
                imported, skipped, source
            )),
            ..Self::new(Operation::Import, user)
        }
    }

    /// Entry for a bulk reset
    pub fn reset(user: &str, removed: usize) -> Self {
        Self {
            diff_summary: Some(format!("{} transaction(s) removed", removed)),
            ..Self::new(Operation::Reset, user)
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.user
        );

        if let Some(position) = self.position {
            output.push_str(&format!(" #{}", position));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;
    use chrono::NaiveDate;

    fn sample() -> Transaction {
        Transaction::new(
            50,
            "Food",
            "groceries",
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            TransactionType::Expense,
        )
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Import.to_string(), "IMPORT");
        assert_eq!(Operation::Reset.to_string(), "RESET");
    }

    #[test]
    fn test_create_entry() {
        let entry = AuditEntry::create("alice", 3, &sample());

        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.user, "alice");
        assert_eq!(entry.position, Some(3));
        assert!(entry.before.is_none());
        assert_eq!(entry.after.unwrap()["amount"], 50);
    }

    #[test]
    fn test_update_entry() {
        let before = sample();
        let after = Transaction { amount: 75, ..sample() };

        let entry = AuditEntry::update(
            "alice",
            1,
            &before,
            &after,
            Some("amount: 50 -> 75".to_string()),
        );

        assert_eq!(entry.operation, Operation::Update);
        assert!(entry.before.is_some());
        assert!(entry.after.is_some());
        assert_eq!(entry.diff_summary.as_deref(), Some("amount: 50 -> 75"));
    }

    #[test]
    fn test_delete_entry() {
        let entry = AuditEntry::delete("alice", 2, &sample());

        assert_eq!(entry.operation, Operation::Delete);
        assert!(entry.before.is_some());
        assert!(entry.after.is_none());
    }

    #[test]
    fn test_serialization() {
        let entry = AuditEntry::import("bob", "bank.csv", 2, 1);

        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("position"));
        let deserialized: AuditEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.operation, Operation::Import);
        assert_eq!(
            deserialized.diff_summary.as_deref(),
            Some("2 imported, 1 skipped from bank.csv")
        );
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::delete("alice", 2, &sample());

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("DELETE"));
        assert!(formatted.contains("alice"));
        assert!(formatted.contains("#2"));
    }
}
