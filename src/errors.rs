use rust_decimal::Decimal;
use thiserror::Error;

/// Validation failures raised by the scheduling, trend, and budget engine.
///
/// Every variant is local to the call that produced it; state touched by the
/// failing call is left unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid interval: {0}")]
    InvalidInterval(String),
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),
    #[error("Amount must be greater than zero (got {0})")]
    NonPositiveAmount(Decimal),
    #[error("No budget set for category: {0}")]
    UnknownCategory(String),
    #[error("Invalid transaction type: {0}")]
    InvalidKind(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Category must not be empty")]
    EmptyCategory,
}

/// Error type for the export collaborator.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Engine(#[from] EngineError),
}
