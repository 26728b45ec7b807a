use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::time_interval::Interval;
use super::transaction::{
    parse_amount, parse_date, validate_amount, validate_category, Transaction, TransactionKind,
};
use crate::errors::EngineError;

const MAX_PREVIEW_OCCURRENCES: usize = 1024;

/// Whether a rule has at least one occurrence on or before the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleState {
    Due,
    NotDue,
}

/// Template for a transaction that repeats on a fixed interval (rent,
/// subscriptions, salary).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RuleRecord")]
pub struct RecurringRule {
    id: Uuid,
    kind: TransactionKind,
    category: String,
    amount: Decimal,
    interval: Interval,
    next_due: NaiveDate,
    /// Set once `next_due` has no successor inside chrono's calendar.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    exhausted: bool,
}

#[derive(Deserialize)]
struct RuleRecord {
    id: Uuid,
    kind: TransactionKind,
    category: String,
    amount: Decimal,
    interval: Interval,
    next_due: NaiveDate,
    #[serde(default)]
    exhausted: bool,
}

impl TryFrom<RuleRecord> for RecurringRule {
    type Error = EngineError;

    fn try_from(record: RuleRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id,
            kind: record.kind,
            category: validate_category(record.category)?,
            amount: validate_amount(record.amount)?,
            interval: record.interval,
            next_due: record.next_due,
            exhausted: record.exhausted,
        })
    }
}

impl RecurringRule {
    /// Creates a rule whose first occurrence falls on `start`.
    pub fn new(
        kind: TransactionKind,
        category: impl Into<String>,
        amount: Decimal,
        interval: Interval,
        start: NaiveDate,
    ) -> Result<Self, EngineError> {
        Ok(Self {
            id: Uuid::new_v4(),
            kind,
            category: validate_category(category.into())?,
            amount: validate_amount(amount)?,
            interval,
            next_due: start,
            exhausted: false,
        })
    }

    pub fn parse(
        kind: &str,
        category: &str,
        amount: &str,
        interval: &str,
        start: &str,
    ) -> Result<Self, EngineError> {
        Self::new(
            kind.parse()?,
            category,
            parse_amount(amount)?,
            interval.parse()?,
            parse_date(start)?,
        )
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn next_due(&self) -> NaiveDate {
        self.next_due
    }

    /// True once the rule's last representable occurrence has been emitted.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn state(&self, today: NaiveDate) -> RuleState {
        if !self.exhausted && self.next_due <= today {
            RuleState::Due
        } else {
            RuleState::NotDue
        }
    }

    /// Number of occurrences `process` would emit for `today`, without
    /// touching the rule.
    pub fn pending_occurrences(&self, today: NaiveDate) -> usize {
        let mut count = 0usize;
        if self.exhausted {
            return count;
        }
        let mut due = self.next_due;
        while due <= today {
            count += 1;
            match self.interval.checked_next_date(due) {
                Some(next) => due = next,
                None => break,
            }
        }
        count
    }

    /// Lists upcoming due dates up to and including `until`, capped at a fixed
    /// number of entries.
    pub fn preview(&self, until: NaiveDate) -> Vec<NaiveDate> {
        let mut dates = Vec::new();
        if self.exhausted {
            return dates;
        }
        let mut due = self.next_due;
        while due <= until && dates.len() < MAX_PREVIEW_OCCURRENCES {
            dates.push(due);
            match self.interval.checked_next_date(due) {
                Some(next) => due = next,
                None => break,
            }
        }
        dates
    }

    fn occurrence(&self) -> Transaction {
        Transaction::occurrence(self.id, self.kind, &self.category, self.amount, self.next_due)
    }
}

/// Emits every occurrence of `rule` due on or before `today`, oldest first,
/// and moves `next_due` past `today`.
///
/// Each emitted transaction is paired with exactly one advance of `next_due`,
/// so calling this again with the same `today` returns an empty vector. A rule
/// whose next occurrence would fall past the end of the calendar is marked
/// exhausted and never emits again.
pub fn process(rule: &mut RecurringRule, today: NaiveDate) -> Vec<Transaction> {
    let mut emitted = Vec::new();
    while !rule.exhausted && rule.next_due <= today {
        emitted.push(rule.occurrence());
        match rule.interval.checked_next_date(rule.next_due) {
            Some(next) => rule.next_due = next,
            None => {
                rule.exhausted = true;
                tracing::debug!(rule = %rule.id, last = %rule.next_due, "recurring rule exhausted");
            }
        }
    }
    emitted
}

/// Runs [`process`] over every rule and concatenates the occurrences.
pub fn process_all(rules: &mut [RecurringRule], today: NaiveDate) -> Vec<Transaction> {
    rules
        .iter_mut()
        .flat_map(|rule| process(rule, today))
        .collect()
}
