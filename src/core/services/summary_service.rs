use std::path::Path;

use rust_decimal::Decimal;

use crate::config::Config;
use crate::export::csv;
use crate::ledger::transaction::saturating_add;
use crate::ledger::{BudgetHealth, BudgetStatus, Ledger, TransactionKind};

use super::{ServiceError, ServiceResult};

/// Budget line of a [`FinancialSummary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLine {
    pub category: String,
    pub limit: Decimal,
    pub spent: Decimal,
    pub remaining_signed: Decimal,
    pub remaining_floored: Decimal,
    /// The remaining amount in the form `Config::floor_remaining` selects.
    pub remaining: Decimal,
    pub status: BudgetStatus,
    pub health: BudgetHealth,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinancialSummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net: Decimal,
    pub categories: Vec<CategoryLine>,
}

pub struct SummaryService;

impl SummaryService {
    /// Income and expense totals over the whole history plus the state of
    /// every budget, in category order. Totals saturate at `Decimal::MAX`.
    pub fn summarize(ledger: &Ledger, config: &Config) -> FinancialSummary {
        let total_for = |kind: TransactionKind| -> Decimal {
            ledger
                .transactions()
                .iter()
                .filter(|txn| txn.kind() == kind)
                .fold(Decimal::ZERO, |total, txn| saturating_add(total, txn.amount()))
        };
        let total_income = total_for(TransactionKind::Income);
        let total_expenses = total_for(TransactionKind::Expense);

        let categories = ledger
            .budgets()
            .budgets()
            .map(|budget| {
                let remaining_signed = budget.remaining_signed();
                let remaining_floored = budget.remaining_floored();
                CategoryLine {
                    category: budget.category().to_string(),
                    limit: budget.limit(),
                    spent: budget.spent(),
                    remaining_signed,
                    remaining_floored,
                    remaining: if config.floor_remaining {
                        remaining_floored
                    } else {
                        remaining_signed
                    },
                    status: budget.status(),
                    health: budget.health(config.alert_threshold_percent),
                }
            })
            .collect();

        FinancialSummary {
            total_income,
            total_expenses,
            net: total_income - total_expenses,
            categories,
        }
    }

    /// Writes the ledger's transactions to `path` in the CSV export format.
    pub fn export_transactions(ledger: &Ledger, path: &Path) -> ServiceResult<usize> {
        csv::export_to_path(path, ledger.transactions()).map_err(ServiceError::from)
    }
}
