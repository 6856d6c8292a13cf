use std::path::PathBuf;
use std::sync::Arc;

use finrec_core::Entity;

use super::IdStrategy;

/// Compile-time-checked repository configuration
///
/// Everything a repository needs to know about its entity type, injected at
/// construction: where the JSON file lives, how identifiers are assigned,
/// and how to read an identifier back as a sequence value when reseeding the
/// counter from persisted records (0 for non-sequential identifiers).
pub struct RepoConfig<E: Entity> {
    pub path: PathBuf,
    pub strategy: Arc<dyn IdStrategy<E>>,
    pub sequence_key: fn(&E) -> u64,
}

impl<E: Entity> RepoConfig<E> {
    pub fn new(
        path: impl Into<PathBuf>,
        strategy: Arc<dyn IdStrategy<E>>,
        sequence_key: fn(&E) -> u64,
    ) -> Self {
        Self {
            path: path.into(),
            strategy,
            sequence_key,
        }
    }
}
