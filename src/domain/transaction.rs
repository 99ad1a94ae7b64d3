use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Category, Cents, MAX_AMOUNT, decimal_amount};

pub type TransactionId = String;

/// Generate a fresh transaction id.
pub fn new_transaction_id() -> TransactionId {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "income" => Some(TransactionType::Income),
            "expense" => Some(TransactionType::Expense),
            _ => None,
        }
    }

    /// Give a magnitude the sign this direction is stored with:
    /// income is positive, expense is negative.
    pub fn signed(&self, amount: Cents) -> Cents {
        match self {
            TransactionType::Income => amount.abs(),
            TransactionType::Expense => -amount.abs(),
        }
    }

    /// Returns true if `amount` carries the sign this direction requires.
    pub fn agrees_with(&self, amount: Cents) -> bool {
        match self {
            TransactionType::Income => amount > 0,
            TransactionType::Expense => amount < 0,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single income or expense entry.
///
/// Field names and the JSON shape match what is written under the
/// `transactions` key, so a serialized `Vec<Transaction>` is the stored value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub description: String,
    /// Signed amount: positive for income, negative for expense
    #[serde(with = "decimal_amount")]
    pub amount: Cents,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Raw category value, preserved verbatim even if unrecognized
    pub category: String,
    pub date: NaiveDate,
}

impl Transaction {
    /// Build a record from validated input, deriving the amount's sign from
    /// its type.
    pub fn from_input(id: TransactionId, input: TransactionInput) -> Self {
        Self {
            id,
            description: input.description,
            amount: input.kind.signed(input.amount),
            kind: input.kind,
            category: input.category,
            date: input.date,
        }
    }

    pub fn display_category(&self) -> Category {
        Category::for_display(&self.category)
    }

    /// Check the invariants every stored record must hold.
    pub fn check(&self) -> Result<(), InvalidInput> {
        if self.description.trim().is_empty() {
            return Err(InvalidInput::EmptyDescription);
        }
        if self.amount.unsigned_abs() > MAX_AMOUNT.unsigned_abs() {
            return Err(InvalidInput::AmountTooLarge(self.amount));
        }
        if !self.kind.agrees_with(self.amount) {
            return Err(InvalidInput::SignMismatch {
                kind: self.kind,
                amount: self.amount,
            });
        }
        Ok(())
    }
}

/// The user-editable fields of a transaction.
///
/// `amount` is a magnitude; whatever sign it carries is replaced by the one
/// implied by `kind` when the record is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionInput {
    pub description: String,
    pub amount: Cents,
    pub kind: TransactionType,
    pub category: String,
    pub date: NaiveDate,
}

impl TransactionInput {
    pub fn new(
        description: impl Into<String>,
        amount: Cents,
        kind: TransactionType,
        category: Category,
        date: NaiveDate,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            kind,
            category: category.as_str().to_string(),
            date,
        }
    }

    /// Use a category value outside the closed set.
    pub fn with_raw_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// The edit form for an existing record: same fields, amount as a
    /// magnitude.
    pub fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            description: transaction.description.clone(),
            amount: transaction.amount.abs(),
            kind: transaction.kind,
            category: transaction.category.clone(),
            date: transaction.date,
        }
    }

    pub fn validate(&self) -> Result<(), InvalidInput> {
        if self.description.trim().is_empty() {
            return Err(InvalidInput::EmptyDescription);
        }
        if self.amount <= 0 {
            return Err(InvalidInput::NonPositiveAmount(self.amount));
        }
        if self.amount > MAX_AMOUNT {
            return Err(InvalidInput::AmountTooLarge(self.amount));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    EmptyDescription,
    NonPositiveAmount(Cents),
    AmountTooLarge(Cents),
    /// The ledger's totals would no longer fit in `Cents`
    TotalsOutOfRange,
    SignMismatch { kind: TransactionType, amount: Cents },
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidInput::EmptyDescription => write!(f, "description must not be empty"),
            InvalidInput::NonPositiveAmount(amount) => write!(
                f,
                "amount must be a positive number, got {}",
                super::format_cents(*amount)
            ),
            InvalidInput::AmountTooLarge(amount) => write!(
                f,
                "amount {} exceeds the maximum of {}",
                super::format_cents(*amount),
                super::format_cents(MAX_AMOUNT)
            ),
            InvalidInput::TotalsOutOfRange => write!(f, "ledger totals would overflow"),
            InvalidInput::SignMismatch { kind, amount } => write!(
                f,
                "{} amount {} has the wrong sign",
                kind,
                super::format_cents(*amount)
            ),
        }
    }
}

impl std::error::Error for InvalidInput {}
