use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transaction::{saturating_add, validate_amount, validate_category, Transaction};
use crate::errors::EngineError;

/// A spending guardrail for a single category.
///
/// `spent` may exceed `limit`; overspend is a valid state, not an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "BudgetRecord")]
pub struct Budget {
    category: String,
    limit: Decimal,
    spent: Decimal,
}

#[derive(Deserialize)]
struct BudgetRecord {
    category: String,
    limit: Decimal,
    #[serde(default)]
    spent: Decimal,
}

impl TryFrom<BudgetRecord> for Budget {
    type Error = EngineError;

    fn try_from(record: BudgetRecord) -> Result<Self, Self::Error> {
        let mut budget = Budget::new(record.category, record.limit)?;
        if record.spent < Decimal::ZERO {
            return Err(EngineError::InvalidAmount(record.spent.to_string()));
        }
        budget.spent = record.spent;
        Ok(budget)
    }
}

impl Budget {
    pub fn new(category: impl Into<String>, limit: Decimal) -> Result<Self, EngineError> {
        Ok(Self {
            category: validate_category(category.into())?,
            limit: validate_amount(limit)?,
            spent: Decimal::ZERO,
        })
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn limit(&self) -> Decimal {
        self.limit
    }

    pub fn spent(&self) -> Decimal {
        self.spent
    }

    /// `limit - spent`; negative when the category is overspent.
    pub fn remaining_signed(&self) -> Decimal {
        self.limit - self.spent
    }

    /// `limit - spent`, never below zero.
    pub fn remaining_floored(&self) -> Decimal {
        self.remaining_signed().max(Decimal::ZERO)
    }

    pub fn status(&self) -> BudgetStatus {
        if self.spent > self.limit {
            BudgetStatus::AtOrOverBudget
        } else {
            BudgetStatus::WithinBudget
        }
    }

    /// Three-way classification; a category is at risk once `spent` reaches
    /// `threshold_percent` of the limit without going over it.
    pub fn health(&self, threshold_percent: u8) -> BudgetHealth {
        classify_health(self.spent, self.limit, threshold_percent)
    }

    /// A total past the representable range always exceeds the limit.
    pub fn would_exceed(&self, amount: Decimal) -> bool {
        self.spent
            .checked_add(amount)
            .map_or(true, |total| total > self.limit)
    }

    /// `spent` saturates at `Decimal::MAX`.
    fn charge(&mut self, amount: Decimal) {
        self.spent = saturating_add(self.spent, amount);
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BudgetStatus {
    WithinBudget,
    /// `spent` is strictly greater than `limit`.
    AtOrOverBudget,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BudgetHealth {
    WithinBudget,
    AtRisk,
    OverBudget,
}

pub(crate) fn classify_health(spent: Decimal, limit: Decimal, threshold_percent: u8) -> BudgetHealth {
    if spent > limit {
        BudgetHealth::OverBudget
    } else if spent >= at_risk_floor(limit, threshold_percent) {
        BudgetHealth::AtRisk
    } else {
        BudgetHealth::WithinBudget
    }
}

/// `limit * threshold_percent / 100`. Very large limits divide first so the
/// product stays representable.
fn at_risk_floor(limit: Decimal, threshold_percent: u8) -> Decimal {
    let percent = Decimal::from(threshold_percent);
    limit
        .checked_mul(percent)
        .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
        .or_else(|| {
            limit
                .checked_div(Decimal::ONE_HUNDRED)
                .and_then(|share| share.checked_mul(percent))
        })
        .unwrap_or(Decimal::MAX)
}

/// Keeps one [`Budget`] per category and charges expenses against them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, Budget>", into = "BTreeMap<String, Budget>")]
pub struct BudgetTracker {
    budgets: BTreeMap<String, Budget>,
}

impl TryFrom<BTreeMap<String, Budget>> for BudgetTracker {
    type Error = EngineError;

    fn try_from(budgets: BTreeMap<String, Budget>) -> Result<Self, Self::Error> {
        if let Some((key, _)) = budgets
            .iter()
            .find(|(key, budget)| key.as_str() != budget.category())
        {
            return Err(EngineError::UnknownCategory(key.clone()));
        }
        Ok(Self { budgets })
    }
}

impl From<BudgetTracker> for BTreeMap<String, Budget> {
    fn from(tracker: BudgetTracker) -> Self {
        tracker.budgets
    }
}

impl BudgetTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a budget, or replaces the limit of an existing one while
    /// keeping what has been spent so far.
    pub fn set_budget(
        &mut self,
        category: impl Into<String>,
        limit: Decimal,
    ) -> Result<&Budget, EngineError> {
        let fresh = Budget::new(category, limit)?;
        let limit = fresh.limit;
        let budget = self
            .budgets
            .entry(fresh.category.clone())
            .and_modify(|existing| existing.limit = limit)
            .or_insert(fresh);
        Ok(budget)
    }

    pub fn get(&self, category: &str) -> Option<&Budget> {
        self.budgets.get(category)
    }

    pub fn budget(&self, category: &str) -> Result<&Budget, EngineError> {
        self.get(category)
            .ok_or_else(|| EngineError::UnknownCategory(category.to_string()))
    }

    /// Budgets in category order.
    pub fn budgets(&self) -> impl Iterator<Item = &Budget> {
        self.budgets.values()
    }

    pub fn len(&self) -> usize {
        self.budgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }

    /// Pre-check for the alert protocol: would committing `transaction` push
    /// its category over the limit? Never mutates.
    pub fn would_exceed(&self, transaction: &Transaction) -> bool {
        if !transaction.is_expense() {
            return false;
        }
        self.get(transaction.category())
            .map(|budget| budget.would_exceed(transaction.amount()))
            .unwrap_or(false)
    }

    /// Charges an expense to its category's budget. Income and expenses in
    /// categories without a budget are ignored and return `None`.
    pub fn apply(&mut self, transaction: &Transaction) -> Option<&Budget> {
        if !transaction.is_expense() {
            return None;
        }
        let budget = self.budgets.get_mut(transaction.category())?;
        budget.charge(transaction.amount());
        if budget.status() == BudgetStatus::AtOrOverBudget {
            tracing::warn!(
                category = %budget.category,
                limit = %budget.limit,
                spent = %budget.spent,
                "budget exceeded"
            );
        }
        Some(budget)
    }

    pub fn status(&self, category: &str) -> Result<BudgetStatus, EngineError> {
        Ok(self.budget(category)?.status())
    }

    pub fn health(&self, category: &str, threshold_percent: u8) -> Result<BudgetHealth, EngineError> {
        Ok(self.budget(category)?.health(threshold_percent))
    }

    pub fn remaining_signed(&self, category: &str) -> Result<Decimal, EngineError> {
        Ok(self.budget(category)?.remaining_signed())
    }

    pub fn remaining_floored(&self, category: &str) -> Result<Decimal, EngineError> {
        Ok(self.budget(category)?.remaining_floored())
    }

    /// Resets `spent` to zero. This is the only way `spent` ever decreases.
    pub fn clear_spent(&mut self, category: &str) -> Result<(), EngineError> {
        let budget = self
            .budgets
            .get_mut(category)
            .ok_or_else(|| EngineError::UnknownCategory(category.to_string()))?;
        budget.spent = Decimal::ZERO;
        Ok(())
    }
}
