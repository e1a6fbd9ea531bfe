//! CSV export of a transaction view

use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;

use crate::config::paths::validate_user;
use crate::error::{LedgerError, LedgerResult};
use crate::models::Transaction;
use crate::storage::codec;
use crate::storage::file_io::write_atomic;

/// Write the header and every record, in view order
pub fn export_view_csv<W: Write>(records: &[Transaction], writer: &mut W) -> LedgerResult<()> {
    codec::write_transactions(writer, records)
        .map_err(|e| LedgerError::Export(e.to_string()))
}

/// File name used for a user's export
pub fn export_file_name(user: &str) -> String {
    format!("{}_transactions.csv", user)
}

/// Export into an existing directory, replacing an earlier export
///
/// Returns the path written.
pub fn export_to_directory(dir: &Path, user: &str, records: &[Transaction]) -> LedgerResult<PathBuf> {
    if !dir.is_dir() {
        return Err(LedgerError::Export(format!(
            "Not an existing directory: {}",
            dir.display()
        )));
    }
    validate_user(user)?;

    let target = dir.join(export_file_name(user));
    write_atomic(&target, |writer| export_view_csv(records, writer))?;

    info!("exported {} transaction(s) to {}", records.len(), target.display());
    Ok(target)
}
