//! CSV export of processed transactions.
//!
//! One header row `date,type,category,amount` followed by one row per
//! transaction. Amounts are written as plain decimals without a currency
//! symbol and dates as `YYYY-MM-DD`.

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use crate::core::utils::tmp_path;
use crate::errors::StorageError;
use crate::ledger::{Transaction, DATE_FORMAT};

pub const HEADER: [&str; 4] = ["date", "type", "category", "amount"];

/// Writes `transactions` in insertion order and returns the number of rows
/// written, excluding the header.
pub fn write_transactions<W: Write>(
    writer: W,
    transactions: &[Transaction],
) -> Result<usize, StorageError> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER)?;
    for txn in transactions {
        csv_writer.write_record([
            txn.date().format(DATE_FORMAT).to_string(),
            txn.kind().as_str().to_string(),
            txn.category().to_string(),
            txn.amount().to_string(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(transactions.len())
}

pub fn to_csv_string(transactions: &[Transaction]) -> Result<String, StorageError> {
    let mut buffer = Vec::new();
    write_transactions(&mut buffer, transactions)?;
    String::from_utf8(buffer)
        .map_err(|err| StorageError::Io(io::Error::new(io::ErrorKind::InvalidData, err)))
}

/// Writes the export to `path` by staging to a temporary file and renaming it
/// into place.
pub fn export_to_path(path: &Path, transactions: &[Transaction]) -> Result<usize, StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = tmp_path(path);
    let written = {
        let file = fs::File::create(&tmp)?;
        write_transactions(io::BufWriter::new(file), transactions)?
    };
    fs::rename(&tmp, path)?;
    tracing::info!(path = %path.display(), rows = written, "exported transactions");
    Ok(written)
}
