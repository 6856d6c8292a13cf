use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::audit::Operation;
use crate::entity::Entity;

/// Client - a natural person holding accounts
///
/// The identifier is assigned sequentially by the repository; a freshly
/// constructed client carries `None` until the create operation runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    /// Unique identifier, assigned on create
    pub id: Option<u64>,

    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Contact email
    pub email: String,

    /// Contact phone number
    pub phone: String,

    /// Timestamp when this client was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when this client was last updated
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// Create a new Client with no identifier and current timestamps
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: phone.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Full display name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Entity for Client {
    type Id = u64;
    const KIND: &'static str = "client";

    fn id(&self) -> Option<u64> {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = Some(id);
    }
}

/// Operation kinds recorded for client mutations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientOperation {
    Create,
    Update,
    Delete,
    Restore,
}

impl Operation for ClientOperation {
    fn name(&self) -> &'static str {
        match self {
            ClientOperation::Create => "CREATE",
            ClientOperation::Update => "UPDATE",
            ClientOperation::Delete => "DELETE",
            ClientOperation::Restore => "RESTORE",
        }
    }
}
