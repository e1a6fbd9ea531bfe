//! Audit logging for ledger mutations
//!
//! Every add, edit, delete, import and reset is recorded as one JSON line in
//! an append-only log, with the transaction before and after the change.
//!
//! # Example
//!
//! ```rust,ignore
//! use ledger::audit::{generate_diff, AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(audit_log_path);
//! logger.log(&AuditEntry::create("alice", 4, &txn))?;
//!
//! let diff = generate_diff(&before_json, &after_json);
//! logger.log(&AuditEntry::update("alice", 4, &before, &after, diff))?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
