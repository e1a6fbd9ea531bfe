//! Core data models for the ledger
//!
//! The ledger has a single persisted entity, the transaction, plus the field
//! rules every transaction must satisfy.

pub mod transaction;
pub mod validation;

pub use transaction::{Transaction, TransactionType};
pub use validation::{
    parse_amount, parse_category, parse_date, parse_date_or_today, parse_description,
    parse_type, Field, ValidationError,
};
