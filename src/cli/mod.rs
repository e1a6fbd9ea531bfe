//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod export;
pub mod import;
pub mod report;
pub mod transaction;

pub use export::handle_export_command;
pub use import::handle_import_command;
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands, ViewArgs};
