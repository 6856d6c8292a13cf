//! finrec Core - In-memory domain layer for the record store
//!
//! This crate provides the foundational data structures for finrec,
//! including:
//! - Client, Account, Card and Transaction models with serde support
//! - The `Entity` capability trait ("has a stable identifier")
//! - Per-entity operation-kind enums used for audit tagging
//! - The append-only audit log and its query surface
//! - The error taxonomy and the logging facility
//!
//! Persistence and the repository engine live in `finrec-store`; this crate
//! is deliberately free of file I/O.

pub mod audit;
pub mod entity;
pub mod errors;
pub mod logging;
pub mod model;

// Re-export commonly used types
pub use audit::{AuditLog, AuditRecord, Operation};
pub use entity::Entity;
pub use errors::{FinrecError, Result};
pub use model::{Account, Card, Client, Transaction};
