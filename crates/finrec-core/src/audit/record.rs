use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single entry in the audit trail
///
/// Records are immutable once constructed: created, appended, never touched
/// again. The entity is captured as a JSON snapshot so later mutations of the
/// live record cannot retroactively change history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Unique record identifier
    pub id: Uuid,

    /// Entity-type tag of the affected record
    pub entity_kind: String,

    /// Identifier of the affected record, in display form
    pub entity_id: String,

    /// Canonical operation name (CREATE, UPDATE, DELETE, RESTORE, ...)
    pub operation: String,

    /// Defensive JSON copy of the entity at mutation time. `Null` when the
    /// snapshot could not be serialized; the record is still kept.
    pub snapshot: serde_json::Value,

    /// When the mutation happened
    pub timestamp: DateTime<Utc>,

    /// The acting principal the mutation is attributed to
    pub performed_by: String,
}

impl AuditRecord {
    /// Construct a record stamped with a fresh id and the current time
    pub fn new(
        entity_kind: impl Into<String>,
        entity_id: impl Into<String>,
        operation: impl Into<String>,
        snapshot: serde_json::Value,
        performed_by: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            entity_kind: entity_kind.into(),
            entity_id: entity_id.into(),
            operation: operation.into(),
            snapshot,
            timestamp: Utc::now(),
            performed_by: performed_by.into(),
        }
    }
}
