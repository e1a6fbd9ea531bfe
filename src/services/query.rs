//! Query engine over an in-memory snapshot of transactions
//!
//! A [`TransactionView`] starts from a full load and is narrowed and
//! reordered in place. Every row remembers its 1-based position in the full
//! listing, so a filtered view can still name rows for edit and delete.

use std::cmp::Ordering;

use chrono::NaiveDate;
use clap::ValueEnum;

use crate::error::LedgerResult;
use crate::models::{parse_date, Transaction};

/// Field a view can be sorted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    Date,
    Amount,
}

/// Sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortDirection {
    #[default]
    #[value(name = "asc", alias = "ascending")]
    Ascending,
    #[value(name = "desc", alias = "descending")]
    Descending,
}

/// A transaction together with its position in the full listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRow {
    pub position: usize,
    pub transaction: Transaction,
}

/// The current, narrowing view over a snapshot
#[derive(Debug, Clone, Default)]
pub struct TransactionView {
    rows: Vec<ViewRow>,
}

impl TransactionView {
    /// Build a view over a full listing; positions start at 1
    pub fn new(transactions: Vec<Transaction>) -> Self {
        let rows = transactions
            .into_iter()
            .enumerate()
            .map(|(idx, transaction)| ViewRow {
                position: idx + 1,
                transaction,
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[ViewRow] {
        &self.rows
    }

    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.rows.iter().map(|row| &row.transaction)
    }

    pub fn into_transactions(self) -> Vec<Transaction> {
        self.rows.into_iter().map(|row| row.transaction).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keep rows whose category equals `term`, ignoring case
    pub fn filter_by_category(&mut self, term: &str) -> &mut Self {
        self.rows.retain(|row| row.transaction.category_matches(term));
        self
    }

    /// Keep rows dated within `[start, end]`; a missing end means `today`
    pub fn filter_by_date_range(
        &mut self,
        start: NaiveDate,
        end: Option<NaiveDate>,
        today: NaiveDate,
    ) -> &mut Self {
        let end = end.unwrap_or(today);
        self.rows
            .retain(|row| row.transaction.date >= start && row.transaction.date <= end);
        self
    }

    /// Keep rows where any field contains `term`, ignoring case
    ///
    /// A blank term leaves the view unchanged.
    pub fn search(&mut self, term: &str) -> &mut Self {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self;
        }
        self.rows.retain(|row| {
            row.transaction
                .field_strings()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        });
        self
    }

    /// Stable sort; ties keep their current relative order in both directions
    pub fn sort_by(&mut self, key: SortKey, direction: SortDirection) -> &mut Self {
        self.rows.sort_by(|a, b| {
            let ord = compare(&a.transaction, &b.transaction, key);
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });
        self
    }
}

fn compare(a: &Transaction, b: &Transaction, key: SortKey) -> Ordering {
    match key {
        SortKey::Date => a.date.cmp(&b.date),
        SortKey::Amount => a.amount.cmp(&b.amount),
    }
}

/// Optional filters applied as category, date range, search, then sort
#[derive(Debug, Clone, Default)]
pub struct ViewQuery {
    pub category: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub search: Option<String>,
    pub sort: Option<(SortKey, SortDirection)>,
}

impl ViewQuery {
    /// Create a new empty query
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn date_range(mut self, from: Option<String>, to: Option<String>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn sort(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort = Some((key, direction));
        self
    }

    /// Whether no filter or sort is set
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.from.is_none()
            && self.to.is_none()
            && self.search.is_none()
            && self.sort.is_none()
    }

    /// Narrow `view` in place
    ///
    /// Dates are parsed before anything is filtered. With only `to` set the
    /// range is open at the start; with only `from` set it ends today.
    pub fn apply(&self, view: &mut TransactionView, today: NaiveDate) -> LedgerResult<()> {
        let from = self.from.as_deref().map(parse_date).transpose()?;
        let to = self.to.as_deref().map(parse_date).transpose()?;

        if let Some(category) = &self.category {
            view.filter_by_category(category);
        }
        if from.is_some() || to.is_some() {
            view.filter_by_date_range(from.unwrap_or(NaiveDate::MIN), to, today);
        }
        if let Some(term) = &self.search {
            view.search(term);
        }
        if let Some((key, direction)) = self.sort {
            view.sort_by(key, direction);
        }
        Ok(())
    }
}
