//! Transaction model
//!
//! A transaction is one line of the ledger: a positive whole amount, a
//! category, a free-form description, a date and whether it was income or an
//! expense. Transactions carry no stored identifier; callers address them by
//! their 1-based position in the most recent full listing.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::validation::{self, ValidationError};

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Lowercase name as stored on disk
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// The other type
    pub fn toggled(&self) -> Self {
        match self {
            Self::Income => Self::Expense,
            Self::Expense => Self::Income,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validation::parse_type(s)
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Amount in whole currency units, always greater than zero
    pub amount: u64,

    /// Category name, 3-20 ASCII letters, case preserved
    pub category: String,

    /// Free-form description, may be empty
    #[serde(default)]
    pub description: String,

    /// Transaction date
    pub date: NaiveDate,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl Transaction {
    /// Create a transaction without validating it
    pub fn new(
        amount: u64,
        category: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
        kind: TransactionType,
    ) -> Self {
        Self {
            amount,
            category: category.into(),
            description: description.into(),
            date,
            kind,
        }
    }

    /// Build a transaction from raw field input, applying every field rule
    pub fn parse(
        amount: &str,
        category: &str,
        description: &str,
        date: &str,
        kind: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            amount: validation::parse_amount(amount)?,
            category: validation::parse_category(category)?,
            description: validation::parse_description(description),
            date: validation::parse_date(date)?,
            kind: validation::parse_type(kind)?,
        })
    }

    /// Check if this is income
    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    /// Case-insensitive category comparison
    pub fn category_matches(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(category.trim())
    }

    /// Re-check the field rules on an already-built value
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::parse_amount(&self.amount.to_string())?;
        let category = validation::parse_category(&self.category)?;
        if category != self.category {
            return Err(ValidationError::new(
                validation::Field::Category,
                &self.category,
                "category must not have surrounding whitespace",
            ));
        }
        Ok(())
    }

    /// The string form of every field, in storage order
    pub fn field_strings(&self) -> [String; 5] {
        [
            self.amount.to_string(),
            self.category.clone(),
            self.description.clone(),
            self.date.format(validation::DATE_FORMAT).to_string(),
            self.kind.to_string(),
        ]
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format(validation::DATE_FORMAT),
            self.kind,
            self.category,
            self.amount
        )?;
        if !self.description.is_empty() {
            write!(f, " ({})", self.description)?;
        }
        Ok(())
    }
}
