//! finrec Store - JSON persistence and the generic repository engine
//!
//! This crate owns everything that touches the filesystem:
//! - `json`: load/save of entity lists as flat JSON array files, with
//!   atomic temp-then-rename writes and fail-soft loading
//! - `repo`: the generic repository engine (CRUD, soft delete, identifier
//!   assignment, auto-save policy) parameterized over `finrec_core::Entity`
//! - `registry`: the store context wiring one repository per entity type,
//!   with a resettable process-global accessor
//!
//! One JSON file per entity type, a single top-level array, no envelope.

pub mod errors;
pub mod json;
pub mod registry;
pub mod repo;

// Re-export commonly used types
pub use registry::StoreContext;
pub use repo::{IdStrategy, RepoConfig, Repository, Sequential, StructuredCode, SuppliedOrSequence};
