//! Storage error types.

use domain::Version;
use thiserror::Error;

/// Errors that can occur in a storage port.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// An update carried a stale version.
    #[error("Version conflict on {entity} {id}: expected {expected}, actual {actual}")]
    VersionConflict {
        entity: &'static str,
        id: String,
        expected: Version,
        actual: Version,
    },

    /// Update or delete targeted a row that does not exist.
    #[error("{entity} {id} does not exist")]
    Missing { entity: &'static str, id: String },
}

/// Convenience type alias for storage results.
pub type Result<T> = std::result::Result<T, StoreError>;
