use thiserror::Error;

/// Result type alias using FinrecError
pub type Result<T> = std::result::Result<T, FinrecError>;

/// Error taxonomy for finrec operations
///
/// Lookups that find nothing are not errors anywhere in this system; they
/// surface as `Option`/empty collections. The variants here cover the cases
/// that genuinely cannot be absorbed: failed writes, broken serialization,
/// and internal invariant breaches.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FinrecError {
    /// Filesystem operation failed
    #[error("I/O error during {op}: {message}")]
    Io { op: String, message: String },

    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Persisting the working set failed
    #[error("Persistence error: {message}")]
    Persistence { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Conversion from serde_json::Error to FinrecError
impl From<serde_json::Error> for FinrecError {
    fn from(err: serde_json::Error) -> Self {
        FinrecError::Serialization {
            message: err.to_string(),
        }
    }
}
