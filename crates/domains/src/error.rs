//! # AppError
//!
//! Centralized error handling for the wingmate ecosystem.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all domain operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., Profile, Match, Friendship)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Validation failure (e.g., bio too long, malformed email)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Credential failure (e.g., bad login password)
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Resource already exists (e.g., duplicate email, duplicate friendship)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Transient backing-store failure (network/timeout); safe for the
    /// caller to retry.
    #[error("transient store error: {0}")]
    Transient(String),

    /// Infrastructure failure (e.g., DB down, corrupt row)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl AppError {
    /// Shorthand for the common "referenced id has no record" case.
    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        Self::NotFound(entity.to_string(), id.to_string())
    }
}

/// A specialized Result type for wingmate domain logic.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_mentions_entity_and_id() {
        let err = AppError::not_found("profile", "abc-123");
        assert_eq!(err.to_string(), "profile not found with ID abc-123");
    }
}
