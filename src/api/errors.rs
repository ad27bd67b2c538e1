//! API error types
//!
//! API errors are pass-through: store, ledger and storage failures keep
//! their own codes. Only malformed requests get an API-level code.

use std::fmt;

use crate::store::StoreError;

/// API error severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Recoverable error
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

/// API-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// Malformed JSON, missing or ill-typed field
    QrmInvalidRequest,
    /// `op` names no known operation
    QrmUnknownOperation,
}

impl ApiErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            ApiErrorCode::QrmInvalidRequest => "QRM_INVALID_REQUEST",
            ApiErrorCode::QrmUnknownOperation => "QRM_UNKNOWN_OPERATION",
        }
    }

    pub fn severity(&self) -> Severity {
        Severity::Error
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// API error with the originating subsystem's code preserved
#[derive(Debug)]
pub struct ApiError {
    code: String,
    message: String,
    severity: Severity,
}

impl ApiError {
    fn from_code(code: ApiErrorCode, message: String) -> Self {
        Self {
            code: code.code().to_string(),
            message,
            severity: code.severity(),
        }
    }

    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::from_code(ApiErrorCode::QrmInvalidRequest, reason.into())
    }

    pub fn unknown_operation(op: impl Into<String>) -> Self {
        Self::from_code(
            ApiErrorCode::QrmUnknownOperation,
            format!("Unknown operation: {}", op.into()),
        )
    }

    /// Pass-through from the engine
    pub fn from_store_error(err: StoreError) -> Self {
        Self {
            code: err.code().to_string(),
            severity: if err.is_fatal() {
                Severity::Fatal
            } else {
                Severity::Error
            },
            message: err.to_string(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self.severity, Severity::Fatal)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::from_store_error(err)
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
