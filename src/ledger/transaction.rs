use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::EngineError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = EngineError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            _ => Err(EngineError::InvalidKind(raw.to_string())),
        }
    }
}

/// A single dated income or expense entry.
///
/// Transactions are immutable once built: an edit is a removal followed by a
/// new transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "TransactionRecord")]
pub struct Transaction {
    id: Uuid,
    kind: TransactionKind,
    category: String,
    amount: Decimal,
    date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rule_id: Option<Uuid>,
}

/// Wire shape of a [`Transaction`]; validated before it becomes one.
#[derive(Deserialize)]
struct TransactionRecord {
    id: Uuid,
    kind: TransactionKind,
    category: String,
    amount: Decimal,
    date: NaiveDate,
    #[serde(default)]
    rule_id: Option<Uuid>,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = EngineError;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id,
            kind: record.kind,
            category: validate_category(record.category)?,
            amount: validate_amount(record.amount)?,
            date: record.date,
            rule_id: record.rule_id,
        })
    }
}

impl Transaction {
    pub fn new(
        kind: TransactionKind,
        category: impl Into<String>,
        amount: Decimal,
        date: NaiveDate,
    ) -> Result<Self, EngineError> {
        Ok(Self {
            id: Uuid::new_v4(),
            kind,
            category: validate_category(category.into())?,
            amount: validate_amount(amount)?,
            date,
            rule_id: None,
        })
    }

    /// Builds a transaction from the raw `(type, category, amount, date)`
    /// tuple a collaborator collects from the user.
    pub fn parse(kind: &str, category: &str, amount: &str, date: &str) -> Result<Self, EngineError> {
        Self::new(
            kind.parse()?,
            category,
            parse_amount(amount)?,
            parse_date(date)?,
        )
    }

    /// Occurrence of a recurring rule; the rule already validated its fields.
    pub(crate) fn occurrence(
        rule_id: Uuid,
        kind: TransactionKind,
        category: &str,
        amount: Decimal,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            category: category.to_string(),
            amount,
            date,
            rule_id: Some(rule_id),
        }
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

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Rule that generated this transaction, if any.
    pub fn rule_id(&self) -> Option<Uuid> {
        self.rule_id
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Amount with income positive and expenses negative.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

pub(crate) fn validate_amount(amount: Decimal) -> Result<Decimal, EngineError> {
    if amount <= Decimal::ZERO {
        return Err(EngineError::NonPositiveAmount(amount));
    }
    Ok(amount)
}

pub(crate) fn validate_category(category: String) -> Result<String, EngineError> {
    let trimmed = category.trim();
    if trimmed.is_empty() {
        return Err(EngineError::EmptyCategory);
    }
    if trimmed.len() == category.len() {
        Ok(category)
    } else {
        Ok(trimmed.to_string())
    }
}

/// `lhs + rhs`, clamped to the representable range instead of overflowing.
pub(crate) fn saturating_add(lhs: Decimal, rhs: Decimal) -> Decimal {
    lhs.checked_add(rhs).unwrap_or(if rhs.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

pub(crate) fn parse_amount(raw: &str) -> Result<Decimal, EngineError> {
    Decimal::from_str(raw.trim()).map_err(|_| EngineError::InvalidAmount(raw.to_string()))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, EngineError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| EngineError::InvalidDate(raw.to_string()))
}
