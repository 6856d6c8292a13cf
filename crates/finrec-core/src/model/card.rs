use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::audit::Operation;
use crate::entity::Entity;

/// Lifecycle status of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    Active,
    Blocked,
}

/// Card - a payment card attached to an account
///
/// Unlike the other entities the identifier is domain-supplied: the card
/// number set by the caller is accepted as the identifier when it is unique.
/// On collision the repository's strategy substitutes a generated key rather
/// than rejecting the create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Card number, doubling as the identifier
    pub number: Option<String>,

    /// Code of the account this card draws on
    pub account_iban: String,

    /// Embossed holder name
    pub holder_name: String,

    /// Expiry month (1-12)
    pub expiry_month: u8,

    /// Expiry year (four digits)
    pub expiry_year: u16,

    /// Lifecycle status
    pub status: CardStatus,

    /// Timestamp when this card was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when this card was last updated
    pub updated_at: DateTime<Utc>,
}

impl Card {
    /// Create a new active Card carrying a caller-supplied number
    pub fn new(
        number: impl Into<String>,
        account_iban: impl Into<String>,
        holder_name: impl Into<String>,
        expiry_month: u8,
        expiry_year: u16,
    ) -> Self {
        let now = Utc::now();
        Self {
            number: Some(number.into()),
            account_iban: account_iban.into(),
            holder_name: holder_name.into(),
            expiry_month,
            expiry_year,
            status: CardStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if this card is blocked
    pub fn is_blocked(&self) -> bool {
        self.status == CardStatus::Blocked
    }
}

impl Entity for Card {
    type Id = String;
    const KIND: &'static str = "card";

    fn id(&self) -> Option<String> {
        self.number.clone()
    }

    fn set_id(&mut self, id: String) {
        self.number = Some(id);
    }
}

/// Operation kinds recorded for card mutations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardOperation {
    Create,
    Update,
    Delete,
    Restore,
    Activate,
    Block,
}

impl Operation for CardOperation {
    fn name(&self) -> &'static str {
        match self {
            CardOperation::Create => "CREATE",
            CardOperation::Update => "UPDATE",
            CardOperation::Delete => "DELETE",
            CardOperation::Restore => "RESTORE",
            CardOperation::Activate => "ACTIVATE",
            CardOperation::Block => "BLOCK",
        }
    }
}
