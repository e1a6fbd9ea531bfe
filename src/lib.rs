//! ledger - file-backed personal income and expense ledger
//!
//! Each user owns one CSV file of transactions. The library validates input,
//! persists transactions with append-or-atomic-replace writes, answers
//! filtered and sorted queries, imports and exports CSV, and aggregates
//! reports over the stored data.
//!
//! # Architecture
//!
//! - `config`: Path resolution and settings
//! - `error`: Custom error types
//! - `models`: The transaction model and its field rules
//! - `storage`: CSV codec, per-user transaction store, atomic file writes
//! - `services`: Add/edit/delete, querying, CSV import
//! - `export`: CSV export of a view
//! - `reports`: Monthly, category, health, recurring and balance reports
//! - `audit`: Append-only log of every mutation
//! - `display`, `cli`: Terminal rendering and command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use ledger::config::{paths::LedgerPaths, settings::Settings};
//! use ledger::storage::Storage;
//!
//! let paths = LedgerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths, "alice")?;
//! let transactions = storage.transactions.load_all()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
