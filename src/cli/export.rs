//! CLI command handler for CSV export

use std::path::Path;

use chrono::NaiveDate;

use crate::error::LedgerResult;
use crate::export::export_to_directory;
use crate::storage::Storage;

use super::transaction::ViewArgs;

/// Handle the export command
///
/// Exports the same view `list` would show for these filters.
pub fn handle_export_command(
    storage: &Storage,
    dir: &Path,
    view: &ViewArgs,
    today: NaiveDate,
) -> LedgerResult<()> {
    let records = view.build_view(storage, today)?.into_transactions();
    let path = export_to_directory(dir, storage.user(), &records)?;

    println!("Exported {} transaction(s) to {}", records.len(), path.display());
    Ok(())
}
