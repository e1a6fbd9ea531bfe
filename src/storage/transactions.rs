//! Transaction store for CSV storage
//!
//! Each user has one `transactions.csv`: a header row followed by one row per
//! transaction. New transactions are appended; edits and deletes load the
//! whole file, change the in-memory copy and replace the file atomically.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Transaction;

use super::codec;
use super::file_io::write_atomic;

/// Convert a 1-based position into a vector index
///
/// Positions refer to the most recent full listing and are only meaningful
/// for that load.
pub fn resolve_position(position: usize, count: usize) -> LedgerResult<usize> {
    if position == 0 || position > count {
        return Err(LedgerError::InvalidRecordId {
            id: position,
            count,
        });
    }
    Ok(position - 1)
}

/// True for an empty file or one that ends in a newline
fn ends_with_newline(file: &mut File) -> io::Result<bool> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::Start(len - 1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// Run `write` against an append-mode file, truncating back to the
/// original length if it fails
fn append_with_rollback<F>(file: &mut File, write: F) -> io::Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let original_len = file.metadata()?.len();
    if let Err(e) = write(file) {
        file.set_len(original_len)?;
        return Err(e);
    }
    Ok(())
}

/// Persistence for one user's transactions
pub struct TransactionStore {
    path: PathBuf,
    owner: String,
}

impl TransactionStore {
    /// Create a store backed by `path`, owned by `owner`
    pub fn new(path: PathBuf, owner: impl Into<String>) -> Self {
        Self {
            path,
            owner: owner.into(),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file exists yet
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Append one transaction
    pub fn append(&self, txn: &Transaction) -> LedgerResult<()> {
        self.append_all(std::slice::from_ref(txn))
    }

    /// Append several transactions with a single write
    ///
    /// Every transaction is validated and encoded before the file is opened,
    /// so a bad value leaves the file untouched. The header is written first
    /// when the file is new or empty.
    pub fn append_all(&self, transactions: &[Transaction]) -> LedgerResult<()> {
        if transactions.is_empty() {
            return Ok(());
        }

        for txn in transactions {
            txn.validate()?;
        }

        let needs_header = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == ErrorKind::NotFound => true,
            Err(e) => {
                return Err(LedgerError::Storage(format!(
                    "Failed to inspect {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };
        let bytes = codec::encode_rows(transactions, needs_header)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                LedgerError::Storage(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                LedgerError::Storage(format!("Failed to open {}: {}", self.path.display(), e))
            })?;

        append_with_rollback(&mut file, |file| {
            if !ends_with_newline(file)? {
                file.write_all(b"\n")?;
            }
            file.write_all(&bytes)?;
            file.flush()
        })
        .map_err(|e| LedgerError::Storage(format!("Failed to append transaction: {}", e)))?;

        debug!(
            "appended {} transaction(s) to {}",
            transactions.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Read every transaction; a missing file is an empty ledger
    pub fn load_all(&self) -> LedgerResult<Vec<Transaction>> {
        match self.load_existing() {
            Err(LedgerError::NotFound(_)) => Ok(Vec::new()),
            other => other,
        }
    }

    /// Read every transaction; a missing file is a `NotFound` error
    ///
    /// Edit and delete use this so that "nothing recorded yet" stops them
    /// instead of silently doing nothing.
    pub fn load_existing(&self) -> LedgerResult<Vec<Transaction>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(LedgerError::NotFound(self.owner.clone()))
            }
            Err(e) => {
                return Err(LedgerError::Storage(format!(
                    "Failed to open {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let transactions = codec::read_transactions(BufReader::new(file))?;
        debug!(
            "loaded {} transaction(s) from {}",
            transactions.len(),
            self.path.display()
        );
        Ok(transactions)
    }

    /// Rewrite the whole file with `transactions`, in order
    pub fn replace_all(&self, transactions: &[Transaction]) -> LedgerResult<()> {
        for txn in transactions {
            txn.validate()?;
        }

        let bytes = codec::encode_rows(transactions, true)?;
        write_atomic(&self.path, |writer| {
            writer
                .write_all(&bytes)
                .map_err(|e| LedgerError::Storage(format!("Failed to write transactions: {}", e)))
        })?;

        debug!(
            "replaced {} with {} transaction(s)",
            self.path.display(),
            transactions.len()
        );
        Ok(())
    }

    /// Replace the transaction at a 1-based position, returning the old value
    pub fn update(&self, position: usize, txn: Transaction) -> LedgerResult<Transaction> {
        txn.validate()?;
        let mut transactions = self.load_existing()?;
        let index = resolve_position(position, transactions.len())?;

        let previous = std::mem::replace(&mut transactions[index], txn);
        self.replace_all(&transactions)?;
        Ok(previous)
    }

    /// Remove the transaction at a 1-based position
    pub fn delete(&self, position: usize) -> LedgerResult<Transaction> {
        let mut transactions = self.load_existing()?;
        let index = resolve_position(position, transactions.len())?;

        let removed = transactions.remove(index);
        self.replace_all(&transactions)?;
        Ok(removed)
    }

    /// Remove every transaction, keeping a header-only file
    ///
    /// Returns the number of transactions removed.
    pub fn clear(&self) -> LedgerResult<usize> {
        let count = self.load_existing()?.len();
        self.replace_all(&[])?;
        Ok(count)
    }
}
