//! Ledger domain records, owned stores, and the date arithmetic they rely on.

pub mod budget;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod recurring;
pub mod time_interval;
pub mod transaction;

pub use budget::{Budget, BudgetHealth, BudgetStatus, BudgetTracker};
pub use ledger::Ledger;
pub use recurring::{process, process_all, RecurringRule, RuleState};
pub use time_interval::{advance, parse_and_advance, Interval, TrendPeriod};
pub use transaction::{Transaction, TransactionKind, DATE_FORMAT};
