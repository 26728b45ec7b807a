//! Budget registration and the check-then-commit alert protocol.

use rust_decimal::Decimal;

use crate::ledger::{Budget, Ledger, Transaction};

use super::{ServiceError, ServiceResult};

/// Result of recording a transaction through [`BudgetService::record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordOutcome {
    /// The transaction would push its category over the limit.
    pub alert: bool,
    /// The transaction was stored and charged.
    pub committed: bool,
}

pub struct BudgetService;

impl BudgetService {
    pub fn set_budget(ledger: &mut Ledger, category: &str, limit: Decimal) -> ServiceResult<Budget> {
        let budget = ledger
            .budgets_mut()
            .set_budget(category, limit)
            .map_err(ServiceError::from)?
            .clone();
        ledger.touch();
        tracing::debug!(category = budget.category(), limit = %budget.limit(), "budget set");
        Ok(budget)
    }

    /// Records `transaction`, asking `confirm` first when it would exceed the
    /// category's budget. A declined confirmation leaves the ledger untouched.
    pub fn record<F>(ledger: &mut Ledger, transaction: Transaction, confirm: F) -> RecordOutcome
    where
        F: FnOnce(&Transaction, &Budget) -> bool,
    {
        let alert = ledger.budgets().would_exceed(&transaction);
        if alert {
            let proceed = match ledger.budgets().get(transaction.category()) {
                Some(budget) => confirm(&transaction, budget),
                None => true,
            };
            if !proceed {
                tracing::info!(category = transaction.category(), "transaction declined over budget");
                return RecordOutcome {
                    alert,
                    committed: false,
                };
            }
        }
        ledger.commit(transaction);
        RecordOutcome {
            alert,
            committed: true,
        }
    }

    /// Records a transaction without prompting; overspend is still reported.
    pub fn record_unchecked(ledger: &mut Ledger, transaction: Transaction) -> RecordOutcome {
        Self::record(ledger, transaction, |_, _| true)
    }

    /// Parses the raw collaborator tuple and records it without prompting.
    pub fn record_input(
        ledger: &mut Ledger,
        kind: &str,
        category: &str,
        amount: &str,
        date: &str,
    ) -> ServiceResult<RecordOutcome> {
        let transaction = Transaction::parse(kind, category, amount, date)?;
        Ok(Self::record_unchecked(ledger, transaction))
    }
}
