use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{AuditRecord, Operation};
use crate::entity::Entity;

/// Append-only, in-memory audit log
///
/// One log instance is shared (via `Arc`) by every repository in a store
/// context, so the trail interleaves mutations across entity types in the
/// order they happened.
///
/// Recording is infallible from the caller's point of view: once the primary
/// mutation has succeeded, nothing on this path may undo it. A snapshot that
/// fails to serialize is logged as a warning and recorded with a `Null` body.
#[derive(Debug, Default)]
pub struct AuditLog {
    records: Mutex<Vec<AuditRecord>>,
}

impl AuditLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record for a mutation of `entity`
    pub fn record<E>(&self, operation: impl Operation, entity: &E, performed_by: &str)
    where
        E: Entity + Serialize,
    {
        let snapshot = match serde_json::to_value(entity) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(
                    entity_kind = E::KIND,
                    error = %err,
                    "Audit snapshot serialization failed; recording null snapshot"
                );
                serde_json::Value::Null
            }
        };

        let entity_id = entity.id().map(|id| id.to_string()).unwrap_or_default();
        let record = AuditRecord::new(
            E::KIND,
            entity_id,
            operation.name(),
            snapshot,
            performed_by,
        );

        tracing::debug!(
            audit_id = %record.id,
            entity_kind = %record.entity_kind,
            entity_id = %record.entity_id,
            operation = %record.operation,
            performed_by = %record.performed_by,
            "Recorded audit entry"
        );

        self.lock().push(record);
    }

    /// Find a record by its identifier
    pub fn find_by_id(&self, id: &Uuid) -> Option<AuditRecord> {
        self.lock().iter().find(|r| &r.id == id).cloned()
    }

    /// Full history for one entity, oldest first
    pub fn history(&self, entity_kind: &str, entity_id: &str) -> Vec<AuditRecord> {
        self.lock()
            .iter()
            .filter(|r| r.entity_kind == entity_kind && r.entity_id == entity_id)
            .cloned()
            .collect()
    }

    /// Records within `[from, to]` inclusive. An inverted range is empty, not
    /// an error.
    pub fn find_by_date_range(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<AuditRecord> {
        if from > to {
            return Vec::new();
        }
        self.lock()
            .iter()
            .filter(|r| r.timestamp >= from && r.timestamp <= to)
            .cloned()
            .collect()
    }

    /// Records attributed to one acting principal
    pub fn find_by_user(&self, performed_by: &str) -> Vec<AuditRecord> {
        self.lock()
            .iter()
            .filter(|r| r.performed_by == performed_by)
            .cloned()
            .collect()
    }

    /// Records with the given canonical operation name
    pub fn find_by_operation(&self, operation: &str) -> Vec<AuditRecord> {
        self.lock()
            .iter()
            .filter(|r| r.operation == operation)
            .cloned()
            .collect()
    }

    /// Snapshot of the whole trail, oldest first
    pub fn records(&self) -> Vec<AuditRecord> {
        self.lock().clone()
    }

    /// Number of records in the trail
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check whether the trail is empty
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A poisoned lock only means another thread panicked mid-append; the
    // vec itself is still well-formed, so recover the guard.
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<AuditRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
