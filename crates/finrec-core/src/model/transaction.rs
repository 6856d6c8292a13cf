use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::audit::Operation;
use crate::entity::Entity;

/// Direction of a money movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    Transfer,
}

/// Transaction - a recorded money movement between accounts
///
/// Transactions are append-mostly: updates exist only so misrecorded entries
/// can be corrected, and the soft-delete lifecycle applies like everywhere
/// else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, assigned on create
    pub id: Option<u64>,

    /// Source account code (None for deposits)
    pub source_iban: Option<String>,

    /// Target account code (None for withdrawals)
    pub target_iban: Option<String>,

    /// Moved amount, always positive
    pub amount: Decimal,

    /// ISO currency code
    pub currency: String,

    /// Movement kind
    pub kind: TransactionKind,

    /// Timestamp when the movement was executed
    pub executed_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transfer between two accounts
    pub fn transfer(
        source_iban: impl Into<String>,
        target_iban: impl Into<String>,
        amount: Decimal,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            source_iban: Some(source_iban.into()),
            target_iban: Some(target_iban.into()),
            amount,
            currency: currency.into(),
            kind: TransactionKind::Transfer,
            executed_at: Utc::now(),
        }
    }

    /// Create a new deposit into an account
    pub fn deposit(target_iban: impl Into<String>, amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            id: None,
            source_iban: None,
            target_iban: Some(target_iban.into()),
            amount,
            currency: currency.into(),
            kind: TransactionKind::Deposit,
            executed_at: Utc::now(),
        }
    }

    /// Create a new withdrawal from an account
    pub fn withdrawal(source_iban: impl Into<String>, amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            id: None,
            source_iban: Some(source_iban.into()),
            target_iban: None,
            amount,
            currency: currency.into(),
            kind: TransactionKind::Withdrawal,
            executed_at: Utc::now(),
        }
    }
}

impl Entity for Transaction {
    type Id = u64;
    const KIND: &'static str = "transaction";

    fn id(&self) -> Option<u64> {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = Some(id);
    }
}

/// Operation kinds recorded for transaction mutations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionOperation {
    Create,
    Update,
    Delete,
    Restore,
}

impl Operation for TransactionOperation {
    fn name(&self) -> &'static str {
        match self {
            TransactionOperation::Create => "CREATE",
            TransactionOperation::Update => "UPDATE",
            TransactionOperation::Delete => "DELETE",
            TransactionOperation::Restore => "RESTORE",
        }
    }
}
