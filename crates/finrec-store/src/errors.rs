//! Error handling for finrec-store
//!
//! Wraps finrec-core FinrecError with store-specific helpers

use finrec_core::errors::FinrecError;

pub use finrec_core::errors::Result;

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> FinrecError {
    FinrecError::Io {
        op: operation.to_string(),
        message: err.to_string(),
    }
}

/// Create a persistence error
pub fn persistence_error(message: impl Into<String>) -> FinrecError {
    FinrecError::Persistence {
        message: message.into(),
    }
}
