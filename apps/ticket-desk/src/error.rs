//! # API Error Type
//!
//! Unified error type for counter commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Ticket Desk                            │
//! │                                                                         │
//! │  Command Function → Result<T, ApiError>                                 │
//! │         │                                                               │
//! │         ├── ValidationError ───► VALIDATION_ERROR  (fix field, retry)   │
//! │         ├── CoreError ─────────► BUSINESS_LOGIC                         │
//! │         ├── no current batch ──► EMPTY_BATCH       (blocking message)   │
//! │         └── file write failed ─► EXPORT_ERROR                           │
//! │                                                                         │
//! │  None of these end the session; the shell prints the message and       │
//! │  waits for the next command.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use ticket_core::{CoreError, ValidationError};

/// Error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "EMPTY_BATCH",
///   "message": "Please generate tickets first."
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Form input rejected
    ValidationError,

    /// Business rule violation
    BusinessLogic,

    /// Print/export requested with no generated batch
    EmptyBatch,

    /// Writing the export file failed
    ExportError,

    /// Anything else
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an empty-batch guard error.
    pub fn empty_batch(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::EmptyBatch, message)
    }

    /// Creates an export error.
    pub fn export(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ExportError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => ApiError::from(e),
            CoreError::QuantityTooLarge { requested, max } => ApiError::validation(format!(
                "Quantity {} exceeds maximum batch size ({})",
                requested, max
            )),
            other => {
                tracing::error!(error = %other, "Allocation precondition violated");
                ApiError::new(ErrorCode::BusinessLogic, other.to_string())
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
