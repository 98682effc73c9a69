//! JSON file persistence for the stock ledger.
//!
//! The document is a single UTF-8 JSON object: item names as keys, integer
//! quantities as values, indented by four spaces. There is no version field.

mod json_file;

pub use json_file::{load_ledger, save_ledger, to_pretty_json, DEFAULT_DATA_PATH};
