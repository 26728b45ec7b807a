//! Groups a transaction history into daily, weekly, or monthly trend buckets.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::EngineError;
use crate::ledger::budget::classify_health;
use crate::ledger::transaction::saturating_add;
use crate::ledger::{BudgetHealth, BudgetTracker, Transaction, TransactionKind, TrendPeriod};

/// Total of one category over one period, keyed by the period's first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendBucket {
    pub bucket_start: NaiveDate,
    pub total: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Advice {
    CutBack,
    WatchClosely,
    OnTrack,
    SetBudget,
}

impl Advice {
    fn from_health(health: Option<BudgetHealth>) -> Self {
        match health {
            Some(BudgetHealth::OverBudget) => Advice::CutBack,
            Some(BudgetHealth::AtRisk) => Advice::WatchClosely,
            Some(BudgetHealth::WithinBudget) => Advice::OnTrack,
            None => Advice::SetBudget,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Advice::CutBack => {
                "You're overspending in this category. Consider reducing unnecessary expenses."
            }
            Advice::WatchClosely => "You're close to the limit for this category.",
            Advice::OnTrack => "Good job staying within budget! Keep it up.",
            Advice::SetBudget => "Consider setting a budget for this category.",
        }
    }
}

/// Spending of one category compared against its budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendingAnalysis {
    pub category: String,
    pub total_spent: Decimal,
    pub limit: Option<Decimal>,
    pub health: Option<BudgetHealth>,
    pub advice: Advice,
}

pub struct TrendAggregator;

impl TrendAggregator {
    /// Sums the amounts of `category`'s transactions per bucket, income and
    /// expenses alike, sorted by bucket start ascending.
    ///
    /// An unknown category or an empty history yields an empty vector.
    pub fn group(
        transactions: &[Transaction],
        category: &str,
        period: TrendPeriod,
    ) -> Vec<TrendBucket> {
        bucketize(
            transactions
                .iter()
                .filter(|txn| txn.category() == category)
                .map(|txn| (txn.date(), txn.amount())),
            period,
        )
    }

    /// [`TrendAggregator::group`] with the period given as user input.
    pub fn group_str(
        transactions: &[Transaction],
        category: &str,
        period: &str,
    ) -> Result<Vec<TrendBucket>, EngineError> {
        Ok(Self::group(transactions, category, period.parse()?))
    }

    /// Net flow per bucket: income counts positive, expenses negative.
    pub fn group_signed(
        transactions: &[Transaction],
        category: &str,
        period: TrendPeriod,
    ) -> Vec<TrendBucket> {
        bucketize(
            transactions
                .iter()
                .filter(|txn| txn.category() == category)
                .map(|txn| (txn.date(), txn.signed_amount())),
            period,
        )
    }

    /// Buckets only the transactions of one kind.
    pub fn group_by_kind(
        transactions: &[Transaction],
        category: &str,
        kind: TransactionKind,
        period: TrendPeriod,
    ) -> Vec<TrendBucket> {
        bucketize(
            transactions
                .iter()
                .filter(|txn| txn.category() == category && txn.kind() == kind)
                .map(|txn| (txn.date(), txn.amount())),
            period,
        )
    }

    /// Transactions dated within the given calendar month, in insertion order.
    pub fn in_month(transactions: &[Transaction], year: i32, month: u32) -> Vec<&Transaction> {
        transactions
            .iter()
            .filter(|txn| txn.date().year() == year && txn.date().month() == month)
            .collect()
    }

    /// Compares each category's total expenses against its budget. Covers
    /// every category that has expenses or a budget, sorted by name.
    pub fn analyze(
        transactions: &[Transaction],
        budgets: &BudgetTracker,
        threshold_percent: u8,
    ) -> Vec<SpendingAnalysis> {
        let mut spent: BTreeMap<&str, Decimal> = BTreeMap::new();
        for txn in transactions.iter().filter(|txn| txn.is_expense()) {
            let total = spent.entry(txn.category()).or_insert(Decimal::ZERO);
            *total = saturating_add(*total, txn.amount());
        }
        let categories: BTreeSet<&str> = spent
            .keys()
            .copied()
            .chain(budgets.budgets().map(|budget| budget.category()))
            .collect();

        categories
            .into_iter()
            .map(|category| {
                let total_spent = spent.get(category).copied().unwrap_or(Decimal::ZERO);
                let budget = budgets.get(category);
                let limit = budget.map(|budget| budget.limit());
                // Judged on recorded history, not the tracker's running total.
                let health =
                    limit.map(|limit| classify_health(total_spent, limit, threshold_percent));
                SpendingAnalysis {
                    category: category.to_string(),
                    total_spent,
                    limit,
                    health,
                    advice: Advice::from_health(health),
                }
            })
            .collect()
    }
}

fn bucketize(
    entries: impl Iterator<Item = (NaiveDate, Decimal)>,
    period: TrendPeriod,
) -> Vec<TrendBucket> {
    let mut totals: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for (date, amount) in entries {
        let total = totals
            .entry(period.bucket_start(date))
            .or_insert(Decimal::ZERO);
        *total = saturating_add(*total, amount);
    }
    tracing::debug!(%period, buckets = totals.len(), "grouped transactions");
    totals
        .into_iter()
        .map(|(bucket_start, total)| TrendBucket {
            bucket_start,
            total,
        })
        .collect()
}
