//! CSV import service
//!
//! Reads an external CSV whose columns are located by header name, validates
//! every row with the same rules as manual entry, and appends the valid rows
//! to the active ledger in one batch.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use log::{info, warn};

use crate::audit::AuditEntry;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Field, Transaction};
use crate::storage::codec::ColumnMap;
use crate::storage::Storage;

/// Why a source row was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDiagnostic {
    /// 1-based line in the source file (the header is line 1)
    pub line: u64,
    /// Offending field, when the row could be split into fields
    pub field: Option<Field>,
    pub message: String,
}

impl fmt::Display for RowDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field {
            Some(field) => write!(f, "line {} ({}): {}", self.line, field, self.message),
            None => write!(f, "line {}: {}", self.line, self.message),
        }
    }
}

/// Result of a completed import
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    /// Number of rows appended to the ledger
    pub imported: usize,
    /// Number of rows rejected
    pub skipped: usize,
    /// One entry per skipped row, in file order
    pub diagnostics: Vec<RowDiagnostic>,
}

/// Rows accepted and rejected by a parse pass
#[derive(Debug, Default)]
pub struct ParsedRows {
    pub accepted: Vec<Transaction>,
    pub rejected: Vec<RowDiagnostic>,
}

/// Service for CSV import
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Import every valid row of `path` into the active ledger
    ///
    /// The source must be an existing regular file with a `.csv` extension
    /// whose header names all five columns. Bad rows are skipped, never fatal.
    pub fn import_from(&self, path: &Path) -> LedgerResult<ImportResult> {
        check_source(path)?;

        let file = File::open(path).map_err(|e| {
            LedgerError::Import(format!("Failed to open {}: {}", path.display(), e))
        })?;
        let parsed = parse_rows(BufReader::new(file))?;

        for diagnostic in &parsed.rejected {
            warn!("skipping {}: {}", path.display(), diagnostic);
        }

        self.storage.transactions.append_all(&parsed.accepted)?;

        let result = ImportResult {
            imported: parsed.accepted.len(),
            skipped: parsed.rejected.len(),
            diagnostics: parsed.rejected,
        };
        info!(
            "imported {} row(s) from {} for {}, {} skipped",
            result.imported,
            path.display(),
            self.storage.user(),
            result.skipped
        );

        self.storage.record(AuditEntry::import(
            self.storage.user(),
            &path.display().to_string(),
            result.imported,
            result.skipped,
        ));

        Ok(result)
    }
}

fn check_source(path: &Path) -> LedgerResult<()> {
    if !path.exists() {
        return Err(LedgerError::Import(format!(
            "File not found: {}",
            path.display()
        )));
    }
    if !path.is_file() {
        return Err(LedgerError::Import(format!(
            "Not a regular file: {}",
            path.display()
        )));
    }

    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(LedgerError::Import(format!(
            "Expected a .csv file, got {}",
            path.display()
        )));
    }

    Ok(())
}

/// Split a CSV source into valid transactions and per-row diagnostics
///
/// Only a missing or incomplete header fails the whole parse.
pub fn parse_rows<R: Read>(reader: R) -> LedgerResult<ParsedRows> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| LedgerError::Import(format!("Failed to read header row: {}", e)))?
        .clone();
    let columns = ColumnMap::from_headers(&headers).map_err(|missing| {
        LedgerError::Import(format!("Missing required column(s): {}", missing.join(", ")))
    })?;

    let mut parsed = ParsedRows::default();
    for result in reader.records() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or_default();
                parsed.rejected.push(RowDiagnostic {
                    line,
                    field: None,
                    message: e.to_string(),
                });
                continue;
            }
        };
        let line = row.position().map(|p| p.line()).unwrap_or_default();

        let record = match columns.extract(&row) {
            Ok(record) => record,
            Err(field) => {
                parsed.rejected.push(RowDiagnostic {
                    line,
                    field: Some(field),
                    message: "missing field".into(),
                });
                continue;
            }
        };

        match Transaction::parse(
            &record.amount,
            &record.category,
            &record.description,
            &record.date,
            &record.kind,
        ) {
            Ok(txn) => parsed.accepted.push(txn),
            Err(e) => parsed.rejected.push(RowDiagnostic {
                line,
                field: Some(e.field),
                message: e.to_string(),
            }),
        }
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::LedgerPaths;
    use crate::models::TransactionType;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().join("data"));
        let storage = Storage::open(paths, "alice").unwrap();
        (temp_dir, storage)
    }

    fn write_source(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_import_skips_invalid_rows() {
        let (temp_dir, storage) = create_test_storage();
        let source = write_source(
            &temp_dir,
            "bank.csv",
            "amount,category,description,date,type\n\
             20,Food,pizza,2025-01-05,expense\n\
             -5,Food,refund,2025-01-06,expense\n\
             1000,Salary,january,2025-01-31,income\n",
        );

        let result = ImportService::new(&storage).import_from(&source).unwrap();

        assert_eq!((result.imported, result.skipped), (2, 1));
        assert_eq!(result.diagnostics[0].line, 3);
        assert_eq!(result.diagnostics[0].field, Some(Field::Amount));

        let stored = storage.transactions.load_all().unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[1].kind, TransactionType::Income);
    }

    #[test]
    fn test_import_appends_to_existing() {
        let (temp_dir, storage) = create_test_storage();
        storage
            .transactions
            .append(&Transaction::new(
                7,
                "Rent",
                "",
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                TransactionType::Expense,
            ))
            .unwrap();
        let source = write_source(
            &temp_dir,
            "more.CSV",
            "amount,category,description,date,type\n9,Food,,2025-01-02,expense\n",
        );

        let result = ImportService::new(&storage).import_from(&source).unwrap();

        assert_eq!(result.imported, 1);
        let amounts: Vec<u64> = storage
            .transactions
            .load_all()
            .unwrap()
            .iter()
            .map(|t| t.amount)
            .collect();
        assert_eq!(amounts, vec![7, 9]);
    }

    #[test]
    fn test_import_reads_columns_by_name() {
        let data = "Type, Date ,Note,Amount,Category,Description\n\
                    income,2025-02-01,x,300,Salary,  bonus  \n";
        let parsed = parse_rows(data.as_bytes()).unwrap();

        assert!(parsed.rejected.is_empty());
        let txn = &parsed.accepted[0];
        assert_eq!(txn.amount, 300);
        assert_eq!(txn.kind, TransactionType::Income);
        assert_eq!(txn.description, "bonus");
    }

    #[test]
    fn test_import_reports_each_bad_field() {
        let data = "amount,category,description,date,type\n\
                    5,Fo,,2025-01-01,expense\n\
                    5,Food,,01/02/2025,expense\n\
                    5,Food,,2025-01-03,transfer\n\
                    5,Food\n";
        let parsed = parse_rows(data.as_bytes()).unwrap();

        assert!(parsed.accepted.is_empty());
        let found: Vec<(u64, Option<Field>)> =
            parsed.rejected.iter().map(|d| (d.line, d.field)).collect();
        assert_eq!(
            found,
            vec![
                (2, Some(Field::Category)),
                (3, Some(Field::Date)),
                (4, Some(Field::Type)),
                (5, Some(Field::Description)),
            ]
        );
    }

    #[test]
    fn test_import_missing_columns() {
        let err = parse_rows("amount,date\n5,2025-01-01\n".as_bytes()).unwrap_err();
        match err {
            LedgerError::Import(msg) => {
                assert!(msg.contains("category"));
                assert!(msg.contains("type"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_import_rejects_bad_sources() {
        let (temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage);

        let missing = temp_dir.path().join("nope.csv");
        assert!(matches!(service.import_from(&missing), Err(LedgerError::Import(_))));

        let txt = write_source(&temp_dir, "data.txt", "amount\n");
        assert!(matches!(service.import_from(&txt), Err(LedgerError::Import(_))));

        assert!(matches!(
            service.import_from(temp_dir.path()),
            Err(LedgerError::Import(_))
        ));
        assert!(!storage.transactions.exists());
    }

    #[test]
    fn test_import_is_audited() {
        let (temp_dir, storage) = create_test_storage();
        let source = write_source(
            &temp_dir,
            "bank.csv",
            "amount,category,description,date,type\n5,Food,,2025-01-01,expense\n",
        );

        ImportService::new(&storage).import_from(&source).unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Import);
    }
}
