//! Error types for the storage and registry layers.
//!
//! Errors are classified by who should act on them:
//! - Storage faults: the store could not be read or written. Load paths
//!   recover from these by reseeding; save paths surface them.
//! - Validation failures: the submitted record is incomplete. Nothing is
//!   persisted; the caller re-prompts the user.
//!
//! Not-found on update/delete is deliberately NOT an error — registries
//! report it through `Ok(None)` / `Ok(false)` so callers can distinguish
//! "nothing happened" from "happened" without treating it as a fault.

use thiserror::Error;

/// Errors from the durable key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Home directory not found")]
    HomeDirNotFound,

    #[error("Failed to create data directory: {0}")]
    CreateDir(std::io::Error),

    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors from the registry layer.
#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Required field missing: {0}")]
    MissingField(&'static str),

    #[error("Follow-up milestones are disabled for this customer")]
    FollowUpsDisabled,
}

impl DbError {
    /// True for caller-visible validation failures (re-prompt the user),
    /// false for storage faults (retry or report).
    pub fn is_validation(&self) -> bool {
        matches!(self, DbError::MissingField(_) | DbError::FollowUpsDisabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_classification() {
        assert!(DbError::MissingField("name").is_validation());
        assert!(DbError::FollowUpsDisabled.is_validation());
        let store_err = DbError::Store(StoreError::HomeDirNotFound);
        assert!(!store_err.is_validation());
    }

    #[test]
    fn test_display_names_the_field() {
        let err = DbError::MissingField("vehicleInfo.vinNumber");
        assert_eq!(
            err.to_string(),
            "Required field missing: vehicleInfo.vinNumber"
        );
    }
}
