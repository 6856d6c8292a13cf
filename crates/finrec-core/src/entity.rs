use std::fmt::Display;

/// Capability trait for domain records owned by a repository
///
/// An entity is a plain value object with a stable identifier. The identifier
/// is `None` until a repository assigns one (or, for card numbers, until the
/// caller supplies one). Repositories treat entities as immutable: every
/// update replaces the stored instance wholesale, keyed by this identifier.
pub trait Entity: Clone + Send + 'static {
    /// Identifier type: numeric for clients and transactions, a structured
    /// code for accounts, a card number for cards.
    type Id: Clone + PartialEq + Display + Send;

    /// Stable entity-type tag, used for audit attribution and file naming.
    const KIND: &'static str;

    /// The identifier, if one has been assigned.
    fn id(&self) -> Option<Self::Id>;

    /// Assign the identifier. Called exactly once per entity, by the
    /// repository's identifier strategy.
    fn set_id(&mut self, id: Self::Id);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Widget {
        id: Option<u64>,
        label: String,
    }

    impl Entity for Widget {
        type Id = u64;
        const KIND: &'static str = "widget";

        fn id(&self) -> Option<u64> {
            self.id
        }

        fn set_id(&mut self, id: u64) {
            self.id = Some(id);
        }
    }

    #[test]
    fn test_id_round_trip() {
        let mut w = Widget {
            id: None,
            label: "w".to_string(),
        };
        assert!(w.id().is_none());
        w.set_id(7);
        assert_eq!(w.id(), Some(7));
        assert_eq!(Widget::KIND, "widget");
    }
}
