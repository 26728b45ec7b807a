pub mod budget_service;
pub mod recurrence_service;
pub mod summary_service;
pub mod trend_service;

pub use budget_service::{BudgetService, RecordOutcome};
pub use recurrence_service::{RecurrenceService, RuleSnapshot};
pub use summary_service::{CategoryLine, FinancialSummary, SummaryService};
pub use trend_service::{Advice, SpendingAnalysis, TrendAggregator, TrendBucket};

use crate::errors::{EngineError, StorageError};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
