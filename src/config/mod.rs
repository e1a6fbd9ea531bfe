//! Configuration module for the ledger
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - Settings persistence
//! - User selection

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::Settings;
