//! Identifier-assignment strategies
//!
//! Each entity type picks one strategy at wiring time. All strategies uphold
//! the same guarantee: the returned identifier is unused across the active
//! and deleted sets at assignment time.

use std::sync::atomic::{AtomicU64, Ordering};

use finrec_core::Entity;
use rand::Rng;

/// What a strategy may consult while assigning an identifier
pub struct IdContext<'a, E: Entity> {
    counter: &'a AtomicU64,
    in_use: &'a dyn Fn(&E::Id) -> bool,
}

impl<'a, E: Entity> IdContext<'a, E> {
    pub fn new(counter: &'a AtomicU64, in_use: &'a dyn Fn(&E::Id) -> bool) -> Self {
        Self { counter, in_use }
    }

    /// Claim the next value of the sequential counter
    pub fn next_sequence(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::SeqCst)
    }

    /// Whether a candidate already belongs to a live or deleted record
    pub fn is_in_use(&self, id: &E::Id) -> bool {
        (self.in_use)(id)
    }
}

/// Per-entity-type identifier assignment algorithm
pub trait IdStrategy<E: Entity>: Send + Sync {
    /// Produce a unique identifier for a new entity.
    fn assign(&self, entity: &E, ids: &IdContext<'_, E>) -> E::Id;
}

/// Sequential numeric identifiers (clients, transactions)
///
/// Atomic increment-and-get; the counter is reseeded from the persisted
/// maximum on load, so values are never reused across restarts.
pub struct Sequential;

impl<E: Entity> IdStrategy<E> for Sequential
where
    E::Id: From<u64>,
{
    fn assign(&self, _entity: &E, ids: &IdContext<'_, E>) -> E::Id {
        loop {
            let candidate = E::Id::from(ids.next_sequence());
            if !ids.is_in_use(&candidate) {
                return candidate;
            }
        }
    }
}

/// Country-prefixed fixed-length numeric codes (accounts)
///
/// Generated pseudo-randomly and regenerated on collision; does not consume
/// the sequential counter.
pub struct StructuredCode {
    pub prefix: &'static str,
    pub digits: usize,
}

impl<E: Entity> IdStrategy<E> for StructuredCode
where
    E::Id: From<String>,
{
    fn assign(&self, _entity: &E, ids: &IdContext<'_, E>) -> E::Id {
        let mut rng = rand::thread_rng();
        loop {
            let mut code = String::with_capacity(self.prefix.len() + self.digits);
            code.push_str(self.prefix);
            for _ in 0..self.digits {
                code.push(char::from(b'0' + rng.gen_range(0..10u8)));
            }
            let candidate = E::Id::from(code);
            if !ids.is_in_use(&candidate) {
                return candidate;
            }
        }
    }
}

/// Domain-supplied key with fallback-on-collision (cards)
///
/// The caller-supplied key is accepted as-is when unused. On collision a
/// sequence number is substituted instead of rejecting the create; a stricter
/// deployment can swap this strategy out at wiring time.
pub struct SuppliedOrSequence;

impl<E: Entity> IdStrategy<E> for SuppliedOrSequence
where
    E::Id: From<String>,
{
    fn assign(&self, entity: &E, ids: &IdContext<'_, E>) -> E::Id {
        if let Some(supplied) = entity.id() {
            if !ids.is_in_use(&supplied) {
                return supplied;
            }
            tracing::warn!(
                entity_kind = E::KIND,
                supplied = %supplied,
                "Supplied identifier collides; substituting generated key"
            );
        }
        loop {
            let candidate = E::Id::from(ids.next_sequence().to_string());
            if !ids.is_in_use(&candidate) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Keyed {
        key: Option<String>,
        created_at: chrono::DateTime<Utc>,
    }

    impl Entity for Keyed {
        type Id = String;
        const KIND: &'static str = "keyed";

        fn id(&self) -> Option<String> {
            self.key.clone()
        }

        fn set_id(&mut self, id: String) {
            self.key = Some(id);
        }
    }

    fn keyed(key: Option<&str>) -> Keyed {
        Keyed {
            key: key.map(str::to_string),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_structured_code_shape() {
        let counter = AtomicU64::new(1);
        let in_use = |_: &String| false;
        let ctx = IdContext::<Keyed>::new(&counter, &in_use);

        let strategy = StructuredCode {
            prefix: "RO",
            digits: 22,
        };
        let code = strategy.assign(&keyed(None), &ctx);

        assert_eq!(code.len(), 24);
        assert!(code.starts_with("RO"));
        assert!(code[2..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_supplied_key_kept_when_unused() {
        let counter = AtomicU64::new(1);
        let in_use = |_: &String| false;
        let ctx = IdContext::<Keyed>::new(&counter, &in_use);

        let id = SuppliedOrSequence.assign(&keyed(Some("4000123412341234")), &ctx);
        assert_eq!(id, "4000123412341234");
        // Counter untouched
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_supplied_key_falls_back_on_collision() {
        let counter = AtomicU64::new(7);
        let in_use = |id: &String| id == "4000123412341234";
        let ctx = IdContext::<Keyed>::new(&counter, &in_use);

        let id = SuppliedOrSequence.assign(&keyed(Some("4000123412341234")), &ctx);
        assert_eq!(id, "7");
    }
}
