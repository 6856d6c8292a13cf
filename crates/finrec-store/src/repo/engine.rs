use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use serde::Serialize;

use finrec_core::audit::{AuditLog, Operation};
use finrec_core::Entity;

use super::{IdContext, RepoConfig};
use crate::errors::Result;
use crate::json;

/// Auto-save fires on every Nth mutation since the last save...
const AUTO_SAVE_OPS: u32 = 10;
/// ...and whenever the active set reaches an exact multiple of this size
/// immediately after a create.
const AUTO_SAVE_SIZE_MULTIPLE: usize = 10;

/// Mutable working set guarded by the repository lock
///
/// An entity lives in exactly one of `active`/`deleted` at a time; insertion
/// order is preserved in both. `op_counter` counts mutations since the last
/// save and is never persisted.
struct RepoState<E> {
    active: Vec<E>,
    deleted: Vec<E>,
    op_counter: u32,
    loaded: bool,
    saved_once: bool,
    current_user: String,
}

impl<E: Entity> RepoState<E> {
    fn id_in_use(&self, id: &E::Id) -> bool {
        self.active
            .iter()
            .chain(self.deleted.iter())
            .any(|e| e.id().as_ref() == Some(id))
    }
}

/// Generic repository over one entity type
///
/// CRUD plus the soft-delete lifecycle, identifier assignment through the
/// configured strategy, and the auto-save policy. The working set loads
/// lazily from disk on first access; every mutation funnels through one
/// mutex, so in-process writers are serialized. The identifier counter is
/// atomic and lives outside the lock because concurrent creates race to
/// claim consecutive values.
///
/// Lookups that find nothing return `None`/empty, never an error. Save
/// failures do propagate: silently losing a write would break the
/// persistence contract.
pub struct Repository<E: Entity + Serialize + DeserializeOwned> {
    config: RepoConfig<E>,
    id_counter: AtomicU64,
    state: Mutex<RepoState<E>>,
    audit: Arc<AuditLog>,
}

impl<E: Entity + Serialize + DeserializeOwned> Repository<E> {
    /// Create a repository wired to its file path and audit log
    ///
    /// No I/O happens here; the working set loads on first access.
    pub fn new(config: RepoConfig<E>, audit: Arc<AuditLog>) -> Self {
        Self {
            config,
            id_counter: AtomicU64::new(1),
            state: Mutex::new(RepoState {
                active: Vec::new(),
                deleted: Vec::new(),
                op_counter: 0,
                loaded: false,
                saved_once: false,
                current_user: "system".to_string(),
            }),
            audit,
        }
    }

    /// Create an entity, assigning an identifier when needed
    ///
    /// An entity carrying no identifier, or one already in use, gets a fresh
    /// identifier from the configured strategy. Appends to the active set,
    /// records one audit entry, and applies the auto-save policy.
    ///
    /// # Errors
    /// Only a triggered auto-save can fail, with `Io`/`Serialization`.
    pub fn create(&self, mut entity: E, op: impl Operation) -> Result<E> {
        let mut state = self.lock();
        self.ensure_loaded(&mut state);

        let needs_assignment = match entity.id() {
            None => true,
            Some(ref id) => state.id_in_use(id),
        };
        if needs_assignment {
            let assigned = {
                let snapshot: &RepoState<E> = &state;
                let in_use = |id: &E::Id| snapshot.id_in_use(id);
                let ctx = IdContext::new(&self.id_counter, &in_use);
                self.config.strategy.assign(&entity, &ctx)
            };
            entity.set_id(assigned);
        }

        state.active.push(entity.clone());
        state.op_counter += 1;
        self.audit.record(op, &entity, &state.current_user);
        self.autosave_after(&mut state, true)?;
        Ok(entity)
    }

    /// Find an active entity by identifier
    pub fn find_by_id(&self, id: &E::Id) -> Option<E> {
        let mut state = self.lock();
        self.ensure_loaded(&mut state);
        state
            .active
            .iter()
            .find(|e| e.id().as_ref() == Some(id))
            .cloned()
    }

    /// Snapshot of the active set, in insertion order
    pub fn find_all(&self) -> Vec<E> {
        let mut state = self.lock();
        self.ensure_loaded(&mut state);
        state.active.clone()
    }

    /// First active entity matching a predicate
    pub fn find_first(&self, predicate: impl Fn(&E) -> bool) -> Option<E> {
        let mut state = self.lock();
        self.ensure_loaded(&mut state);
        state.active.iter().find(|e| predicate(e)).cloned()
    }

    /// All active entities matching a predicate
    pub fn find_matching(&self, predicate: impl Fn(&E) -> bool) -> Vec<E> {
        let mut state = self.lock();
        self.ensure_loaded(&mut state);
        state
            .active
            .iter()
            .filter(|e| predicate(e))
            .cloned()
            .collect()
    }

    /// Replace the stored entity with the same identifier
    ///
    /// Returns `None` without recording anything when the entity carries no
    /// identifier or the identifier is not in the active set. Position in
    /// the active list is preserved.
    ///
    /// # Errors
    /// Only a triggered auto-save can fail.
    pub fn update(&self, entity: E, op: impl Operation) -> Result<Option<E>> {
        let Some(id) = entity.id() else {
            return Ok(None);
        };
        let mut state = self.lock();
        self.ensure_loaded(&mut state);

        let Some(pos) = state
            .active
            .iter()
            .position(|e| e.id().as_ref() == Some(&id))
        else {
            return Ok(None);
        };

        state.active[pos] = entity.clone();
        state.op_counter += 1;
        self.audit.record(op, &entity, &state.current_user);
        self.autosave_after(&mut state, false)?;
        Ok(Some(entity))
    }

    /// Soft-delete: move an entity from the active to the deleted set
    ///
    /// # Errors
    /// Only a triggered auto-save can fail.
    pub fn delete_by_id(&self, id: &E::Id, op: impl Operation) -> Result<Option<E>> {
        let mut state = self.lock();
        self.ensure_loaded(&mut state);

        let Some(pos) = state.active.iter().position(|e| e.id().as_ref() == Some(id)) else {
            return Ok(None);
        };

        let entity = state.active.remove(pos);
        state.deleted.push(entity.clone());
        state.op_counter += 1;
        self.audit.record(op, &entity, &state.current_user);
        self.autosave_after(&mut state, false)?;
        Ok(Some(entity))
    }

    /// Reverse a soft delete: move an entity back to the active set
    ///
    /// # Errors
    /// Only a triggered auto-save can fail.
    pub fn restore(&self, id: &E::Id, op: impl Operation) -> Result<Option<E>> {
        let mut state = self.lock();
        self.ensure_loaded(&mut state);

        let Some(pos) = state
            .deleted
            .iter()
            .position(|e| e.id().as_ref() == Some(id))
        else {
            return Ok(None);
        };

        let entity = state.deleted.remove(pos);
        state.active.push(entity.clone());
        state.op_counter += 1;
        self.audit.record(op, &entity, &state.current_user);
        self.autosave_after(&mut state, false)?;
        Ok(Some(entity))
    }

    /// Snapshot of the soft-deleted set
    pub fn deleted(&self) -> Vec<E> {
        let mut state = self.lock();
        self.ensure_loaded(&mut state);
        state.deleted.clone()
    }

    /// Number of active entities
    pub fn count(&self) -> usize {
        let mut state = self.lock();
        self.ensure_loaded(&mut state);
        state.active.len()
    }

    /// Force an immediate persist, bypassing the threshold policy
    ///
    /// A no-op when the active set is empty and nothing was ever saved, so a
    /// repository that never held data never creates a file.
    ///
    /// # Errors
    /// `Io`/`Serialization` when the write fails.
    pub fn save(&self) -> Result<()> {
        let mut state = self.lock();
        self.ensure_loaded(&mut state);
        if state.active.is_empty() && !state.saved_once {
            return Ok(());
        }
        self.persist(&mut state)
    }

    /// Set the acting principal attributed to subsequent audit entries
    pub fn set_current_user(&self, user: impl Into<String>) {
        self.lock().current_user = user.into();
    }

    /// The audit log observing this repository
    pub fn audit_log(&self) -> Arc<AuditLog> {
        Arc::clone(&self.audit)
    }

    // A poisoned lock means a panic while the guard was held; the working
    // set is still structurally sound, so recover the guard.
    fn lock(&self) -> MutexGuard<'_, RepoState<E>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lazy first load: read the file (fail-soft) and reseed the counter to
    /// `max(existing identifiers) + 1`.
    fn ensure_loaded(&self, state: &mut RepoState<E>) {
        if state.loaded {
            return;
        }
        let existed = self.config.path.exists();
        state.active = json::load(&self.config.path);
        let max = json::max_identifier(&state.active, self.config.sequence_key);
        self.id_counter.store(max + 1, Ordering::SeqCst);
        state.saved_once = existed;
        state.loaded = true;

        tracing::debug!(
            entity_kind = E::KIND,
            path = %self.config.path.display(),
            count = state.active.len(),
            next_sequence = max + 1,
            "Loaded working set"
        );
    }

    fn persist(&self, state: &mut RepoState<E>) -> Result<()> {
        json::save(&state.active, &self.config.path)?;
        state.op_counter = 0;
        state.saved_once = true;
        Ok(())
    }

    /// Apply the auto-save policy after a successful mutation
    ///
    /// Two independent triggers, either sufficient: the op counter reaching
    /// the threshold, or (after a create only) the active set size landing
    /// on an exact multiple of the threshold.
    fn autosave_after(&self, state: &mut RepoState<E>, after_create: bool) -> Result<()> {
        let ops_hit = state.op_counter >= AUTO_SAVE_OPS;
        let size_hit = after_create && state.active.len() % AUTO_SAVE_SIZE_MULTIPLE == 0;
        if ops_hit || size_hit {
            tracing::debug!(
                entity_kind = E::KIND,
                op_counter = state.op_counter,
                active = state.active.len(),
                "Auto-save threshold reached"
            );
            self.persist(state)?;
        }
        Ok(())
    }
}
