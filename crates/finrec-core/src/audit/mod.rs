//! Audit subsystem
//!
//! Append-only record of "who did what, when, to which entity". Every
//! repository mutation produces exactly one [`AuditRecord`]; the log itself
//! is best-effort and never fails the business operation that triggered it.

mod log;
mod record;

pub use log::AuditLog;
pub use record::AuditRecord;

/// Operation-kind capability implemented by each entity's operation enum
///
/// The audit log stores the canonical name rather than the enum itself so
/// records of different entity types share one queryable trail.
pub trait Operation: Copy {
    /// Canonical operation name, e.g. `"CREATE"` or `"DEACTIVATE"`.
    fn name(&self) -> &'static str;
}
