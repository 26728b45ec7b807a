use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{
    budget::{Budget, BudgetTracker},
    recurring::RecurringRule,
    transaction::Transaction,
};

/// Owned stores for one session: recurring rules, the append-only
/// transaction log, and category budgets.
#[derive(Debug, Clone)]
pub struct Ledger {
    pub name: String,
    rules: Vec<RecurringRule>,
    transactions: Vec<Transaction>,
    budgets: BudgetTracker,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new("Default")
    }
}

impl Ledger {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            rules: Vec::new(),
            transactions: Vec::new(),
            budgets: BudgetTracker::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn add_rule(&mut self, rule: RecurringRule) -> Uuid {
        let id = rule.id();
        self.rules.push(rule);
        self.touch();
        id
    }

    pub fn remove_rule(&mut self, id: Uuid) -> Option<RecurringRule> {
        let index = self.rules.iter().position(|rule| rule.id() == id)?;
        self.touch();
        Some(self.rules.remove(index))
    }

    pub fn rule(&self, id: Uuid) -> Option<&RecurringRule> {
        self.rules.iter().find(|rule| rule.id() == id)
    }

    pub fn rules(&self) -> &[RecurringRule] {
        &self.rules
    }

    pub(crate) fn rules_mut(&mut self) -> &mut [RecurringRule] {
        &mut self.rules
    }

    /// Transactions in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn budgets(&self) -> &BudgetTracker {
        &self.budgets
    }

    pub fn budgets_mut(&mut self) -> &mut BudgetTracker {
        &mut self.budgets
    }

    /// Appends a transaction and charges it to its budget, if any. Returns the
    /// budget after the charge.
    pub fn commit(&mut self, transaction: Transaction) -> Option<Budget> {
        let charged = self.budgets.apply(&transaction).cloned();
        self.transactions.push(transaction);
        self.touch();
        charged
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
