//! Field validation rules
//!
//! Every way a transaction enters the ledger (manual entry, edit, import, and
//! reading the store back) goes through these functions, so the same input is
//! accepted or rejected identically everywhere. Each validator is a pure
//! `&str -> Result<_, ValidationError>` function with no I/O.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::transaction::TransactionType;

/// Minimum category length
pub const CATEGORY_MIN_LEN: usize = 3;

/// Maximum category length
pub const CATEGORY_MAX_LEN: usize = 20;

/// Date format for persisted and entered dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One of the five transaction fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Amount,
    Category,
    Description,
    Date,
    Type,
}

impl Field {
    /// Column name used in CSV headers
    pub fn column(&self) -> &'static str {
        match self {
            Self::Amount => "amount",
            Self::Category => "category",
            Self::Description => "description",
            Self::Date => "date",
            Self::Type => "type",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// A single field failed its rule
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {field} '{value}': {reason}")]
pub struct ValidationError {
    /// Which field was rejected
    pub field: Field,
    /// The raw input as received
    pub value: String,
    /// Human-readable rule that was broken
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: Field, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Parse a transaction amount: a whole number greater than zero
///
/// An optional leading `+` is accepted; signs, decimals and separators are not.
pub fn parse_amount(input: &str) -> Result<u64, ValidationError> {
    let s = input.trim();
    let digits = s.strip_prefix('+').unwrap_or(s);

    if digits.is_empty() {
        return Err(ValidationError::new(Field::Amount, s, "this field cannot be empty"));
    }

    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new(
            Field::Amount,
            s,
            "please enter a whole number greater than zero",
        ));
    }

    let amount: u64 = digits
        .parse()
        .map_err(|_| ValidationError::new(Field::Amount, s, "amount is too large"))?;

    if amount == 0 {
        return Err(ValidationError::new(
            Field::Amount,
            s,
            "amount must be greater than zero",
        ));
    }

    Ok(amount)
}

/// Parse a category: 3 to 20 ASCII letters, case preserved
pub fn parse_category(input: &str) -> Result<String, ValidationError> {
    let s = input.trim();

    if s.is_empty() {
        return Err(ValidationError::new(Field::Category, s, "this field cannot be empty"));
    }

    if !s.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::new(
            Field::Category,
            s,
            "this field can only contain letters",
        ));
    }

    if !(CATEGORY_MIN_LEN..=CATEGORY_MAX_LEN).contains(&s.len()) {
        return Err(ValidationError::new(
            Field::Category,
            s,
            format!(
                "this field must be between {} and {} characters",
                CATEGORY_MIN_LEN, CATEGORY_MAX_LEN
            ),
        ));
    }

    Ok(s.to_string())
}

/// Descriptions are free-form; surrounding whitespace is dropped
pub fn parse_description(input: &str) -> String {
    input.trim().to_string()
}

/// Parse a calendar date in `YYYY-MM-DD` form
pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let s = input.trim();

    if s.is_empty() {
        return Err(ValidationError::new(Field::Date, s, "this field cannot be empty"));
    }

    // chrono accepts unpadded months and days; the stored form is always 10 chars
    if s.len() != 10 {
        return Err(ValidationError::new(
            Field::Date,
            s,
            "invalid date format, please use YYYY-MM-DD",
        ));
    }

    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| {
        ValidationError::new(Field::Date, s, "invalid date format, please use YYYY-MM-DD")
    })
}

/// Parse a date, defaulting to `today` when the input is blank
pub fn parse_date_or_today(input: &str, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    if input.trim().is_empty() {
        Ok(today)
    } else {
        parse_date(input)
    }
}

/// Parse a transaction type (`income` or `expense`, any case)
pub fn parse_type(input: &str) -> Result<TransactionType, ValidationError> {
    let s = input.trim();
    match s.to_ascii_lowercase().as_str() {
        "income" => Ok(TransactionType::Income),
        "expense" => Ok(TransactionType::Expense),
        _ => Err(ValidationError::new(
            Field::Type,
            s,
            "type must be 'income' or 'expense'",
        )),
    }
}
