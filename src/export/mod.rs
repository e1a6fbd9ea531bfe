//! Export module for the ledger
//!
//! Writes the current view back out in the ledger's own five-column CSV
//! layout, so an export can be imported again unchanged.

pub mod csv;

pub use csv::{export_file_name, export_to_directory, export_view_csv};
