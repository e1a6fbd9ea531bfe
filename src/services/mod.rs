//! Service layer for the ledger
//!
//! The service layer provides business logic on top of the storage layer:
//! input validation, the editing workflow, querying and CSV import.

pub mod import;
pub mod query;
pub mod transaction;

pub use import::{ImportResult, ImportService, RowDiagnostic};
pub use query::{SortDirection, SortKey, TransactionView, ViewQuery, ViewRow};
pub use transaction::{NewTransaction, TransactionEditor, TransactionService};
