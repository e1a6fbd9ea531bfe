//! User settings for the ledger
//!
//! Manages preferences shared by every user of this data directory: the
//! currency label shown next to amounts, the default user, and whether
//! mutations are written to the audit log.

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::storage::file_io::{read_json, write_json_atomic};

/// Settings for the ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency label shown next to amounts (no conversion is performed)
    #[serde(default = "default_currency")]
    pub currency: String,

    /// User whose ledger is opened when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_user: Option<String>,

    /// Whether create/update/delete operations are recorded in the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency: default_currency(),
            default_user: None,
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or default settings if the file doesn't exist
    ///
    /// Defaults are not written back; the caller decides when to persist.
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        read_json(paths.settings_file()).map_err(|e| {
            LedgerError::Config(format!("Failed to load settings file: {}", e))
        })
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Pick the active user: explicit choice first, then the configured default
    pub fn resolve_user(&self, explicit: Option<String>) -> Result<String, LedgerError> {
        explicit
            .or_else(|| self.default_user.clone())
            .ok_or_else(|| {
                LedgerError::Config(
                    "No user selected. Pass --user, set LEDGER_USER, or run 'ledger config --default-user NAME'"
                        .into(),
                )
            })
    }
}
