//! JSON store processor
//!
//! Translates between a file path and an ordered sequence of entities.
//! Loading is fail-soft (missing, empty, or corrupt files yield an empty
//! list); saving is a whole-file atomic overwrite.

mod atomic;
mod processor;

pub use atomic::atomic_write;
pub use processor::{load, max_identifier, save};
