//! Transaction row codec
//!
//! Converts transactions to and from the five-column CSV row format
//! `amount,category,description,date,type`. Column positions are resolved
//! through a [`ColumnMap`], fixed for the ledger's own files and read from the
//! header row for imported files.

use std::io::{Read, Write};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{validation, Field, Transaction, ValidationError};

/// Header row of every transaction file, in storage order
pub const HEADER: [&str; 5] = ["amount", "category", "description", "date", "type"];

/// One CSV row with every field still in string form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub amount: String,
    pub category: String,
    pub description: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Produce the persisted row for a transaction
pub fn encode(txn: &Transaction) -> TransactionRecord {
    let [amount, category, description, date, kind] = txn.field_strings();
    TransactionRecord {
        amount,
        category,
        description,
        date,
        kind,
    }
}

/// Parse and validate a row
///
/// The description is taken verbatim; every other field must pass the same
/// rule used for manual entry.
pub fn decode(record: &TransactionRecord) -> Result<Transaction, ValidationError> {
    Ok(Transaction {
        amount: validation::parse_amount(&record.amount)?,
        category: validation::parse_category(&record.category)?,
        description: record.description.clone(),
        date: validation::parse_date(&record.date)?,
        kind: validation::parse_type(&record.kind)?,
    })
}

/// Where each field lives in a CSV row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub amount: usize,
    pub category: usize,
    pub description: usize,
    pub date: usize,
    pub kind: usize,
}

impl ColumnMap {
    /// Layout of the ledger's own files
    pub const STORAGE: ColumnMap = ColumnMap {
        amount: 0,
        category: 1,
        description: 2,
        date: 3,
        kind: 4,
    };

    /// Locate the five columns by name (trimmed, case-insensitive)
    ///
    /// Extra columns are ignored. Returns the names of any missing columns.
    pub fn from_headers(headers: &StringRecord) -> Result<Self, Vec<&'static str>> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };

        let found: Vec<Option<usize>> = HEADER.iter().map(|name| find(*name)).collect();
        let missing: Vec<&'static str> = HEADER
            .iter()
            .zip(&found)
            .filter(|(_, idx)| idx.is_none())
            .map(|(name, _)| *name)
            .collect();

        match found.as_slice() {
            [Some(amount), Some(category), Some(description), Some(date), Some(kind)] => {
                Ok(Self {
                    amount: *amount,
                    category: *category,
                    description: *description,
                    date: *date,
                    kind: *kind,
                })
            }
            _ => Err(missing),
        }
    }

    /// Pull the five fields out of a row; a short row reports the first absent field
    pub fn extract(&self, row: &StringRecord) -> Result<TransactionRecord, Field> {
        let get = |idx: usize, field: Field| row.get(idx).map(str::to_string).ok_or(field);
        Ok(TransactionRecord {
            amount: get(self.amount, Field::Amount)?,
            category: get(self.category, Field::Category)?,
            description: get(self.description, Field::Description)?,
            date: get(self.date, Field::Date)?,
            kind: get(self.kind, Field::Type)?,
        })
    }
}

/// Serialize rows, optionally preceded by the header, into memory
pub fn encode_rows(transactions: &[Transaction], with_header: bool) -> LedgerResult<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    if with_header {
        writer.write_record(HEADER)?;
    }
    for txn in transactions {
        writer.serialize(encode(txn))?;
    }

    writer
        .into_inner()
        .map_err(|e| LedgerError::Storage(format!("Failed to encode rows: {}", e)))
}

/// Write header and rows to any writer
pub fn write_transactions<W: Write>(writer: &mut W, transactions: &[Transaction]) -> LedgerResult<()> {
    let bytes = encode_rows(transactions, true)?;
    writer.write_all(&bytes)?;
    Ok(())
}

/// Read a whole ledger file
///
/// The first row must be the header. Every following row is decoded in
/// order; the first row that fails is reported as a malformed record with
/// its 1-based line number.
pub fn read_transactions<R: Read>(reader: R) -> LedgerResult<Vec<Transaction>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if headers.is_empty() || (headers.len() == 1 && headers[0].is_empty()) {
        return Ok(Vec::new());
    }
    if headers.iter().ne(HEADER.iter().copied()) {
        return Err(LedgerError::Storage(format!(
            "Unexpected header row '{}', expected '{}'",
            headers.iter().collect::<Vec<_>>().join(","),
            HEADER.join(",")
        )));
    }

    let mut transactions = Vec::new();
    for result in reader.records() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();

        if row.len() != HEADER.len() {
            let field = ColumnMap::STORAGE.extract(&row).err().unwrap_or(Field::Type);
            return Err(LedgerError::MalformedRecord {
                line,
                field,
                reason: format!("expected {} fields, found {}", HEADER.len(), row.len()),
            });
        }

        let record = ColumnMap::STORAGE
            .extract(&row)
            .map_err(|field| LedgerError::MalformedRecord {
                line,
                field,
                reason: "missing field".into(),
            })?;
        let txn = decode(&record).map_err(|e| LedgerError::malformed(line, e))?;
        transactions.push(txn);
    }

    Ok(transactions)
}
