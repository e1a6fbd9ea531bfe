//! Transaction service
//!
//! Add, edit, delete and reset for the active user's ledger. Every mutation
//! goes through the store (append for adds, whole-file replace for the rest)
//! and is recorded in the audit log.

use chrono::NaiveDate;
use log::info;

use crate::audit::{generate_diff, AuditEntry};
use crate::error::LedgerResult;
use crate::models::{
    parse_amount, parse_category, parse_date, parse_date_or_today, parse_description,
    Transaction, TransactionType,
};
use crate::storage::{resolve_position, Storage};

/// Raw input for a new transaction, as typed by the user
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub kind: TransactionType,
    pub amount: String,
    pub category: String,
    pub description: String,
    /// Empty means today
    pub date: String,
}

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Every transaction in file order; a missing file is an empty ledger
    pub fn list(&self) -> LedgerResult<Vec<Transaction>> {
        self.storage.transactions.load_all()
    }

    /// Validate raw input and append it
    ///
    /// Returns the new transaction with its position in the full listing.
    pub fn add(&self, input: NewTransaction, today: NaiveDate) -> LedgerResult<(usize, Transaction)> {
        let txn = Transaction {
            amount: parse_amount(&input.amount)?,
            category: parse_category(&input.category)?,
            description: parse_description(&input.description),
            date: parse_date_or_today(&input.date, today)?,
            kind: input.kind,
        };

        let position = self.storage.transactions.load_all()?.len() + 1;
        self.storage.transactions.append(&txn)?;
        info!("added {} for {}", txn, self.storage.user());

        self.storage
            .record(AuditEntry::create(self.storage.user(), position, &txn));

        Ok((position, txn))
    }

    /// Start editing the transaction at `position`
    ///
    /// A missing ledger file is `NotFound`; a position outside the listing is
    /// `InvalidRecordId`.
    pub fn edit(&self, position: usize) -> LedgerResult<TransactionEditor<'a>> {
        let snapshot = self.storage.transactions.load_existing()?;
        let index = resolve_position(position, snapshot.len())?;
        let original = snapshot[index].clone();

        Ok(TransactionEditor {
            storage: self.storage,
            draft: original.clone(),
            original,
            snapshot,
            index,
        })
    }

    /// Delete the transaction at `position`, returning it
    pub fn delete(&self, position: usize) -> LedgerResult<Transaction> {
        let removed = self.storage.transactions.delete(position)?;
        info!("deleted #{} ({}) for {}", position, removed, self.storage.user());

        self.storage
            .record(AuditEntry::delete(self.storage.user(), position, &removed));

        Ok(removed)
    }

    /// Remove every transaction; returns how many were removed
    pub fn reset(&self) -> LedgerResult<usize> {
        let removed = self.storage.transactions.clear()?;
        info!("reset ledger for {}: {} removed", self.storage.user(), removed);

        self.storage
            .record(AuditEntry::reset(self.storage.user(), removed));

        Ok(removed)
    }
}

/// Pending changes to one transaction
///
/// Each setter validates its input and leaves the draft unchanged on error.
/// Nothing is written until [`TransactionEditor::save`].
pub struct TransactionEditor<'a> {
    storage: &'a Storage,
    snapshot: Vec<Transaction>,
    index: usize,
    original: Transaction,
    draft: Transaction,
}

impl<'a> TransactionEditor<'a> {
    /// 1-based position of the transaction being edited
    pub fn position(&self) -> usize {
        self.index + 1
    }

    pub fn original(&self) -> &Transaction {
        &self.original
    }

    pub fn current(&self) -> &Transaction {
        &self.draft
    }

    /// Whether the draft differs from what was loaded
    pub fn is_dirty(&self) -> bool {
        self.draft != self.original
    }

    pub fn change_amount(&mut self, input: &str) -> LedgerResult<&mut Self> {
        self.draft.amount = parse_amount(input)?;
        Ok(self)
    }

    pub fn change_category(&mut self, input: &str) -> LedgerResult<&mut Self> {
        self.draft.category = parse_category(input)?;
        Ok(self)
    }

    pub fn edit_description(&mut self, input: &str) -> &mut Self {
        self.draft.description = parse_description(input);
        self
    }

    pub fn change_date(&mut self, input: &str) -> LedgerResult<&mut Self> {
        self.draft.date = parse_date(input)?;
        Ok(self)
    }

    pub fn set_type(&mut self, kind: TransactionType) -> &mut Self {
        self.draft.kind = kind;
        self
    }

    pub fn toggle_type(&mut self) -> &mut Self {
        self.draft.kind = self.draft.kind.toggled();
        self
    }

    /// Rewrite the ledger with the draft in place of the original
    ///
    /// A clean editor writes nothing. Returns the saved transaction.
    pub fn save(self) -> LedgerResult<Transaction> {
        if !self.is_dirty() {
            return Ok(self.draft);
        }

        let Self {
            storage,
            mut snapshot,
            index,
            original,
            draft,
        } = self;

        snapshot[index] = draft.clone();
        storage.transactions.replace_all(&snapshot)?;

        let diff = match (serde_json::to_value(&original), serde_json::to_value(&draft)) {
            (Ok(before), Ok(after)) => generate_diff(&before, &after),
            _ => None,
        };
        info!(
            "edited #{} for {}: {}",
            index + 1,
            storage.user(),
            diff.as_deref().unwrap_or("no field changes")
        );

        storage.record(AuditEntry::update(
            storage.user(),
            index + 1,
            &original,
            &draft,
            diff,
        ));

        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::LedgerPaths;
    use crate::error::LedgerError;
    use crate::models::Field;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths, "alice").unwrap();
        (temp_dir, storage)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 20).unwrap()
    }

    fn input(kind: TransactionType, amount: &str, category: &str) -> NewTransaction {
        NewTransaction {
            kind,
            amount: amount.into(),
            category: category.into(),
            description: String::new(),
            date: "2025-05-01".into(),
        }
    }

    #[test]
    fn test_add_transaction() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let (position, txn) = service
            .add(input(TransactionType::Expense, " 50 ", " Food "), today())
            .unwrap();

        assert_eq!(position, 1);
        assert_eq!(txn.amount, 50);
        assert_eq!(txn.category, "Food");
        assert_eq!(service.list().unwrap(), vec![txn]);
    }

    #[test]
    fn test_add_defaults_date_to_today() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let mut raw = input(TransactionType::Income, "10", "Gift");
        raw.date = "  ".into();
        let (_, txn) = service.add(raw, today()).unwrap();

        assert_eq!(txn.date, today());
    }

    #[test]
    fn test_add_rejects_invalid_input() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        for (amount, category, field) in [
            ("-5", "Food", Field::Amount),
            ("0", "Food", Field::Amount),
            ("12.5", "Food", Field::Amount),
            ("5", "Fo", Field::Category),
            ("5", "Food2", Field::Category),
        ] {
            let err = service
                .add(input(TransactionType::Expense, amount, category), today())
                .unwrap_err();
            match err {
                LedgerError::Validation(e) => assert_eq!(e.field, field),
                other => panic!("unexpected error: {other}"),
            }
        }

        assert!(!storage.transactions.exists());
    }

    #[test]
    fn test_edit_amount_and_save() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let (_, original) = service
            .add(input(TransactionType::Expense, "50", "Food"), today())
            .unwrap();

        let mut editor = service.edit(1).unwrap();
        editor.change_amount("75").unwrap();
        assert!(editor.is_dirty());
        editor.save().unwrap();

        let reloaded = service.list().unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0], Transaction { amount: 75, ..original });
    }

    #[test]
    fn test_editor_keeps_draft_on_invalid_input() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        service
            .add(input(TransactionType::Expense, "50", "Food"), today())
            .unwrap();

        let mut editor = service.edit(1).unwrap();
        assert!(editor.change_amount("abc").is_err());
        assert!(editor.change_category("x").is_err());
        assert!(editor.change_date("2025-13-01").is_err());
        assert!(!editor.is_dirty());

        editor.toggle_type().edit_description("  lunch  ");
        assert_eq!(editor.current().kind, TransactionType::Income);
        assert_eq!(editor.current().description, "lunch");
        assert_eq!(editor.original().kind, TransactionType::Expense);
    }

    #[test]
    fn test_clean_save_writes_nothing() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        service
            .add(input(TransactionType::Expense, "50", "Food"), today())
            .unwrap();

        service.edit(1).unwrap().save().unwrap();

        let ops: Vec<Operation> = storage
            .audit()
            .read_all()
            .unwrap()
            .into_iter()
            .map(|e| e.operation)
            .collect();
        assert_eq!(ops, vec![Operation::Create]);
    }

    #[test]
    fn test_edit_records_diff() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        service
            .add(input(TransactionType::Expense, "50", "Food"), today())
            .unwrap();

        let mut editor = service.edit(1).unwrap();
        editor.change_amount("75").unwrap();
        editor.save().unwrap();

        let last = storage.audit().read_recent(1, Some("alice")).unwrap();
        assert_eq!(last[0].operation, Operation::Update);
        assert_eq!(last[0].diff_summary.as_deref(), Some("amount: 50 -> 75"));
    }

    #[test]
    fn test_edit_without_file_is_not_found() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        assert!(matches!(service.edit(1), Err(LedgerError::NotFound(_))));
        assert!(service.delete(1).unwrap_err().is_not_found());
        assert!(service.reset().unwrap_err().is_not_found());
    }

    #[test]
    fn test_edit_out_of_range() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        service
            .add(input(TransactionType::Expense, "50", "Food"), today())
            .unwrap();

        assert!(matches!(
            service.edit(2),
            Err(LedgerError::InvalidRecordId { id: 2, count: 1 })
        ));
    }

    #[test]
    fn test_delete_middle() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let (_, a) = service.add(input(TransactionType::Expense, "1", "Food"), today()).unwrap();
        let (_, b) = service.add(input(TransactionType::Expense, "2", "Rent"), today()).unwrap();
        let (_, c) = service.add(input(TransactionType::Income, "3", "Salary"), today()).unwrap();

        assert_eq!(service.delete(2).unwrap(), b);
        assert_eq!(service.list().unwrap(), vec![a, c]);
    }

    #[test]
    fn test_reset() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        service.add(input(TransactionType::Expense, "1", "Food"), today()).unwrap();
        service.add(input(TransactionType::Expense, "2", "Rent"), today()).unwrap();

        assert_eq!(service.reset().unwrap(), 2);
        assert!(service.list().unwrap().is_empty());

        let last = storage.audit().read_recent(1, None).unwrap();
        assert_eq!(last[0].operation, Operation::Reset);
    }
}
