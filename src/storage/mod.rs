//! Storage layer for the ledger
//!
//! One CSV file per user, written with append-or-atomic-replace semantics,
//! plus the shared JSONL audit log.

pub mod codec;
pub mod file_io;
pub mod transactions;

pub use file_io::{read_json, write_json_atomic};
pub use transactions::{resolve_position, TransactionStore};

use log::warn;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::LedgerPaths;
use crate::error::LedgerResult;

/// Storage coordinator for the active user
pub struct Storage {
    paths: LedgerPaths,
    user: String,
    audit_enabled: bool,
    pub transactions: TransactionStore,
    audit: AuditLogger,
}

impl Storage {
    /// Open the ledger of `user`
    ///
    /// The user name is validated before any path is built from it. No file
    /// is created until the first write.
    pub fn open(paths: LedgerPaths, user: &str) -> LedgerResult<Self> {
        let file = paths.transactions_file(user)?;

        Ok(Self {
            transactions: TransactionStore::new(file, user),
            audit: AuditLogger::new(paths.audit_log()),
            audit_enabled: true,
            user: user.to_string(),
            paths,
        })
    }

    /// Turn audit logging on or off (follows `Settings::audit_enabled`)
    pub fn with_audit(mut self, enabled: bool) -> Self {
        self.audit_enabled = enabled;
        self
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    /// Owner of the open ledger
    pub fn user(&self) -> &str {
        &self.user
    }

    /// The audit log reader/writer
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Record a mutation in the audit log
    ///
    /// The ledger file has already changed when this runs, so a failing audit
    /// write is logged and otherwise ignored.
    pub fn record(&self, entry: AuditEntry) {
        if !self.audit_enabled {
            return;
        }
        if let Err(e) = self.audit.log(&entry) {
            warn!("failed to write audit entry ({}): {}", entry.operation, e);
        }
    }
}
