//! CLI command handler for CSV import

use std::path::Path;

use crate::error::LedgerResult;
use crate::services::ImportService;
use crate::storage::Storage;

/// Handle the import command
pub fn handle_import_command(storage: &Storage, file: &Path) -> LedgerResult<()> {
    let result = ImportService::new(storage).import_from(file)?;

    println!("Import from '{}'", file.display());
    println!("{}", "=".repeat(40));
    println!("  Imported: {}", result.imported);
    println!("  Skipped:  {}", result.skipped);

    if !result.diagnostics.is_empty() {
        println!();
        println!("Skipped rows:");
        for diagnostic in &result.diagnostics {
            println!("  {}", diagnostic);
        }
    }

    Ok(())
}
