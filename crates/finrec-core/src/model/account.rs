use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::audit::Operation;
use crate::entity::Entity;

/// Lifecycle status of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Active,
    Inactive,
}

/// Account - a money-holding account owned by a client
///
/// The identifier is a country-prefixed structured code (two-letter prefix
/// plus fixed-length digits), generated by the repository's identifier
/// strategy. It does not come from the sequential counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Structured account code, assigned on create
    pub iban: Option<String>,

    /// Owning client identifier
    pub client_id: u64,

    /// ISO currency code
    pub currency: String,

    /// Current balance
    pub balance: Decimal,

    /// Lifecycle status
    pub status: AccountStatus,

    /// Timestamp when this account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when this account was last updated
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new active Account with a zero balance and no code
    pub fn new(client_id: u64, currency: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            iban: None,
            client_id,
            currency: currency.into(),
            balance: Decimal::ZERO,
            status: AccountStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if this account is active
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }
}

impl Entity for Account {
    type Id = String;
    const KIND: &'static str = "account";

    fn id(&self) -> Option<String> {
        self.iban.clone()
    }

    fn set_id(&mut self, id: String) {
        self.iban = Some(id);
    }
}

/// Operation kinds recorded for account mutations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountOperation {
    Create,
    Update,
    Delete,
    Restore,
    Activate,
    Deactivate,
}

impl Operation for AccountOperation {
    fn name(&self) -> &'static str {
        match self {
            AccountOperation::Create => "CREATE",
            AccountOperation::Update => "UPDATE",
            AccountOperation::Delete => "DELETE",
            AccountOperation::Restore => "RESTORE",
            AccountOperation::Activate => "ACTIVATE",
            AccountOperation::Deactivate => "DEACTIVATE",
        }
    }
}
