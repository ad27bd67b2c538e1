//! Storage error types
//!
//! Error codes:
//! - QRM_STORAGE_UNAVAILABLE (ERROR severity)
//! - QRM_DATA_CORRUPTION (FATAL severity)

use std::fmt;
use std::io;

/// Severity levels for storage errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation fails, engine continues
    Error,
    /// Persisted state cannot be trusted
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Storage-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorCode {
    /// The medium could not be read or written
    QrmStorageUnavailable,
    /// A stored blob failed its checksum or could not be decoded
    QrmDataCorruption,
}

impl StorageErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            StorageErrorCode::QrmStorageUnavailable => "QRM_STORAGE_UNAVAILABLE",
            StorageErrorCode::QrmDataCorruption => "QRM_DATA_CORRUPTION",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            StorageErrorCode::QrmStorageUnavailable => Severity::Error,
            StorageErrorCode::QrmDataCorruption => Severity::Fatal,
        }
    }
}

impl fmt::Display for StorageErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Storage error with the key it concerns and the underlying I/O cause
#[derive(Debug)]
pub struct StorageError {
    code: StorageErrorCode,
    message: String,
    key: Option<String>,
    source: Option<io::Error>,
}

impl StorageError {
    /// The medium failed while reading or writing `key`
    pub fn unavailable(key: &str, message: impl Into<String>, source: io::Error) -> Self {
        Self {
            code: StorageErrorCode::QrmStorageUnavailable,
            message: message.into(),
            key: Some(key.to_string()),
            source: Some(source),
        }
    }

    /// The medium is unusable for a reason that has no I/O cause
    pub fn unavailable_no_source(message: impl Into<String>) -> Self {
        Self {
            code: StorageErrorCode::QrmStorageUnavailable,
            message: message.into(),
            key: None,
            source: None,
        }
    }

    /// The blob stored under `key` cannot be trusted
    pub fn data_corruption(key: &str, reason: impl Into<String>) -> Self {
        Self {
            code: StorageErrorCode::QrmDataCorruption,
            message: reason.into(),
            key: Some(key.to_string()),
            source: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> StorageErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the storage key involved, if known
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Returns whether persisted state is unreadable
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )?;
        if let Some(ref key) = self.key {
            write!(f, " (key: {})", key)?;
        }
        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            StorageErrorCode::QrmStorageUnavailable.code(),
            "QRM_STORAGE_UNAVAILABLE"
        );
        assert_eq!(StorageErrorCode::QrmDataCorruption.code(), "QRM_DATA_CORRUPTION");
    }

    #[test]
    fn test_corruption_is_fatal() {
        let err = StorageError::data_corruption("forum_data", "checksum mismatch");
        assert!(err.is_fatal());
        assert_eq!(err.key(), Some("forum_data"));
    }

    #[test]
    fn test_unavailable_not_fatal() {
        let err = StorageError::unavailable(
            "forum_data",
            "disk full",
            io::Error::new(io::ErrorKind::Other, "disk full"),
        );
        assert!(!err.is_fatal());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_display_contains_code_and_key() {
        let err = StorageError::data_corruption("current_user", "bad header");
        let display = format!("{}", err);
        assert!(display.contains("QRM_DATA_CORRUPTION"));
        assert!(display.contains("FATAL"));
        assert!(display.contains("key: current_user"));
    }
}
