//! Generic repository engine
//!
//! One repository instance per entity type owns the in-memory working set
//! (active + soft-deleted lists), assigns identifiers through a pluggable
//! strategy, and persists through the JSON store processor under the
//! auto-save policy. Every mutation is observed by the shared audit log.

mod config;
mod engine;
mod id_strategy;

pub use config::RepoConfig;
pub use engine::Repository;
pub use id_strategy::{IdContext, IdStrategy, Sequential, StructuredCode, SuppliedOrSequence};
