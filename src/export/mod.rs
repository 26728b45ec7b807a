//! Export collaborators for the transaction stream.

pub mod csv;

pub use self::csv::{export_to_path, to_csv_string, write_transactions, HEADER};
