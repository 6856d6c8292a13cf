//! Load/save of entity lists as flat JSON array files.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::atomic_write;
use crate::errors::Result;

/// Load an ordered sequence of records from a JSON array file
///
/// Never fails the caller: a missing file, an empty file, and malformed
/// content all yield an empty vec. Callers must treat "no data" and "file
/// missing" identically; parse failures are logged as warnings and swallowed
/// (availability over strictness).
pub fn load<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::debug!(
                path = %path.display(),
                error = %err,
                "Store file not readable; starting with empty list"
            );
            return Vec::new();
        }
    };

    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Vec::new();
    }

    match serde_json::from_slice(&bytes) {
        Ok(records) => records,
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "Store file is malformed; degrading to empty list"
            );
            Vec::new()
        }
    }
}

/// Save the full current sequence to a JSON array file
///
/// Whole-file overwrite via atomic temp→rename; an empty slice still writes
/// a valid `[]` file.
///
/// # Errors
/// * `Serialization` - the records could not be encoded as JSON
/// * `Io` - the write or rename failed
pub fn save<T: Serialize>(records: &[T], path: &Path) -> Result<()> {
    let json = serde_json::to_vec_pretty(records)?;
    atomic_write(path, &json)?;

    tracing::debug!(
        path = %path.display(),
        count = records.len(),
        size_bytes = json.len(),
        "Persisted record list"
    );

    Ok(())
}

/// Maximum identifier value observed across `records`
///
/// Returns 0 for an empty sequence. Used to reseed the sequential counter
/// after a load so identifiers are never reused across restarts.
pub fn max_identifier<T>(records: &[T], key: impl Fn(&T) -> u64) -> u64 {
    records.iter().map(key).max().unwrap_or(0)
}
