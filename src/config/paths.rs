//! Path management for the ledger
//!
//! Provides platform-aware path resolution for settings, user data and the
//! audit log.
//!
//! ## Path Resolution Order
//!
//! 1. `LEDGER_CLI_DATA_DIR` environment variable (if set)
//! 2. The platform config directory for `ledger-cli` (e.g. `~/.config/ledger-cli`)
//!
//! Each user owns a directory below `users/` holding their `transactions.csv`.

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::LedgerError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "LEDGER_CLI_DATA_DIR";

/// Longest accepted user name
const MAX_USER_LEN: usize = 32;

/// Manages all paths used by the ledger
#[derive(Debug, Clone)]
pub struct LedgerPaths {
    /// Base directory for all ledger data
    base_dir: PathBuf,
}

impl LedgerPaths {
    /// Create a new LedgerPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and the
    /// override variable is not set.
    pub fn new() -> Result<Self, LedgerError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create LedgerPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding one sub-directory per user
    pub fn users_dir(&self) -> PathBuf {
        self.base_dir.join("users")
    }

    /// Directory for a single user's data
    pub fn user_dir(&self, user: &str) -> Result<PathBuf, LedgerError> {
        validate_user(user)?;
        Ok(self.users_dir().join(user))
    }

    /// Path to a user's transaction file
    pub fn transactions_file(&self, user: &str) -> Result<PathBuf, LedgerError> {
        Ok(self.user_dir(user)?.join("transactions.csv"))
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Ensure the base and users directories exist
    pub fn ensure_directories(&self) -> Result<(), LedgerError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| LedgerError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.users_dir())
            .map_err(|e| LedgerError::Io(format!("Failed to create users directory: {}", e)))?;

        Ok(())
    }
}

/// Check that a user identity is safe to use as a directory name
pub fn validate_user(user: &str) -> Result<(), LedgerError> {
    if user.is_empty() || user.len() > MAX_USER_LEN {
        return Err(LedgerError::Config(format!(
            "User name must be between 1 and {} characters",
            MAX_USER_LEN
        )));
    }

    if !user
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(LedgerError::Config(format!(
            "Invalid user name '{}': use letters, digits, '_' or '-'",
            user
        )));
    }

    Ok(())
}

/// Resolve the default base directory for this platform
fn resolve_default_path() -> Result<PathBuf, LedgerError> {
    ProjectDirs::from("", "", "ledger-cli")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| LedgerError::Config("Could not determine home directory".into()))
}
