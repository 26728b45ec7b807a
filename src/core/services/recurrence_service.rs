//! Services related to recurring-rule maintenance and catch-up processing.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::core::clock::Clock;
use crate::ledger::{
    process, process_all, Ledger, RecurringRule, RuleState, Transaction, TransactionKind,
};

use super::{ServiceError, ServiceResult};

/// Read-only view of a rule for listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSnapshot {
    pub rule_id: Uuid,
    pub kind: TransactionKind,
    pub category: String,
    pub amount: Decimal,
    pub interval_label: &'static str,
    pub next_due: NaiveDate,
    pub state: RuleState,
    pub overdue: usize,
}

pub struct RecurrenceService;

impl RecurrenceService {
    /// Validates the raw user input for a rule and stores it in the ledger.
    pub fn add_rule(
        ledger: &mut Ledger,
        kind: &str,
        category: &str,
        amount: &str,
        interval: &str,
        start: &str,
    ) -> ServiceResult<Uuid> {
        let rule = RecurringRule::parse(kind, category, amount, interval, start)
            .map_err(ServiceError::from)?;
        tracing::debug!(rule = %rule.id(), category = rule.category(), "recurring rule added");
        Ok(ledger.add_rule(rule))
    }

    /// Generates every occurrence due on or before the clock's today, appends
    /// them to the ledger, and charges expenses to their budgets.
    ///
    /// Returns the generated transactions in the order they were committed.
    pub fn catch_up(ledger: &mut Ledger, clock: &dyn Clock) -> Vec<Transaction> {
        Self::catch_up_until(ledger, clock.today())
    }

    pub fn catch_up_until(ledger: &mut Ledger, today: NaiveDate) -> Vec<Transaction> {
        let generated = process_all(ledger.rules_mut(), today);
        for transaction in &generated {
            ledger.commit(transaction.clone());
        }
        if generated.is_empty() {
            tracing::debug!(%today, "no recurring transactions due");
        } else {
            tracing::info!(%today, count = generated.len(), "processed recurring transactions");
        }
        generated
    }

    /// Processes a single rule only. `None` when the rule is not in the ledger.
    pub fn catch_up_rule(
        ledger: &mut Ledger,
        rule_id: Uuid,
        today: NaiveDate,
    ) -> Option<Vec<Transaction>> {
        let rule = ledger
            .rules_mut()
            .iter_mut()
            .find(|rule| rule.id() == rule_id)?;
        let generated = process(rule, today);
        tracing::debug!(rule = %rule_id, count = generated.len(), "processed recurring rule");
        for transaction in &generated {
            ledger.commit(transaction.clone());
        }
        Some(generated)
    }

    /// Lists every rule with its due state, ordered by next due date.
    pub fn snapshots(ledger: &Ledger, today: NaiveDate) -> Vec<RuleSnapshot> {
        let mut snapshots: Vec<RuleSnapshot> = ledger
            .rules()
            .iter()
            .map(|rule| RuleSnapshot {
                rule_id: rule.id(),
                kind: rule.kind(),
                category: rule.category().to_string(),
                amount: rule.amount(),
                interval_label: rule.interval().label(),
                next_due: rule.next_due(),
                state: rule.state(today),
                overdue: rule.pending_occurrences(today),
            })
            .collect();
        snapshots.sort_by(|a, b| {
            a.next_due
                .cmp(&b.next_due)
                .then_with(|| a.category.cmp(&b.category))
        });
        snapshots
    }

    /// Rules currently in the [`RuleState::Due`] state.
    pub fn due_rules(ledger: &Ledger, today: NaiveDate) -> Vec<&RecurringRule> {
        ledger
            .rules()
            .iter()
            .filter(|rule| rule.state(today) == RuleState::Due)
            .collect()
    }

    /// Upcoming due dates of every rule up to `until`, without processing.
    pub fn upcoming(ledger: &Ledger, until: NaiveDate) -> Vec<(Uuid, Vec<NaiveDate>)> {
        ledger
            .rules()
            .iter()
            .map(|rule| (rule.id(), rule.preview(until)))
            .collect()
    }
}
