//! Entity Store errors
//!
//! Error codes:
//! - QRM_VALIDATION_FAILED (ERROR)
//! - QRM_TARGET_NOT_FOUND (ERROR)
//! - QRM_STORAGE_UNAVAILABLE (ERROR, from storage)
//! - QRM_DATA_CORRUPTION (FATAL, from storage)

use thiserror::Error;
use uuid::Uuid;

use crate::model::TargetType;
use crate::storage::StorageError;

/// Result type for store, ledger and query operations
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Input rejected before any mutation was attempted
    #[error("invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    /// A referenced question or answer does not exist
    #[error("{target_type} not found: {id}")]
    TargetNotFound { target_type: TargetType, id: Uuid },

    /// The medium failed or holds corrupt data
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl StoreError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        StoreError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn target_not_found(target_type: TargetType, id: Uuid) -> Self {
        StoreError::TargetNotFound { target_type, id }
    }

    /// Returns the wire error code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Validation { .. } => "QRM_VALIDATION_FAILED",
            StoreError::TargetNotFound { .. } => "QRM_TARGET_NOT_FOUND",
            StoreError::Storage(e) => e.code().code(),
        }
    }

    /// Returns whether persisted state can no longer be trusted
    pub fn is_fatal(&self) -> bool {
        matches!(self, StoreError::Storage(e) if e.is_fatal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(
            StoreError::validation("title", "too short").code(),
            "QRM_VALIDATION_FAILED"
        );
        assert_eq!(
            StoreError::target_not_found(TargetType::Answer, Uuid::nil()).code(),
            "QRM_TARGET_NOT_FOUND"
        );
        let storage: StoreError = StorageError::data_corruption("forum_data", "bad").into();
        assert_eq!(storage.code(), "QRM_DATA_CORRUPTION");
        assert!(storage.is_fatal());
    }

    #[test]
    fn test_display() {
        let err = StoreError::target_not_found(TargetType::Question, Uuid::nil());
        assert_eq!(
            err.to_string(),
            "question not found: 00000000-0000-0000-0000-000000000000"
        );
        let err = StoreError::validation("content", "must be at least 20 characters");
        assert!(err.to_string().starts_with("invalid content"));
    }
}
