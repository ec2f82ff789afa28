//! Service-level errors.

use admit_core::StoreError;
use thiserror::Error;

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Errors produced by the admissions services.
///
/// Store errors pass through transparently; the rest originate in the
/// service layer itself. All are recoverable client-facing failures
/// (422/409/401/404-equivalents), never programming errors.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Datastore failure (`NotFound` by id, or `LockTimeout`)
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A submitted field failed validation.
    #[error("invalid {field}: {reason}")]
    Validation {
        /// The offending form field
        field: &'static str,
        /// Human-readable reason
        reason: String,
    },

    /// The request conflicts with existing data (duplicate email,
    /// duplicate document number).
    #[error("{0}")]
    Conflict(String),

    /// Login failed: unknown email or wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A lookup by something other than record id matched nothing.
    #[error("{0}")]
    NotFound(String),
}

impl ServiceError {
    /// Shorthand for a validation failure.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ServiceError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// True for any validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, ServiceError::Validation { .. })
    }

    /// True for conflicts with existing data.
    pub fn is_conflict(&self) -> bool {
        matches!(self, ServiceError::Conflict(_))
    }
}
