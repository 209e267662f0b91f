//! Unified error types for the domain layer
//!
//! Ordinary bad input to a rules engine (unknown skill, missing difficulty,
//! malformed dice text) never reaches this type: the engines resolve it with
//! defined defaults. What remains are the conditions a caller must act on.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The configured rule system is not registered
    #[error("Unknown rule system '{requested}' (known systems: {})", known.join(", "))]
    UnknownSystem {
        requested: String,
        known: Vec<String>,
    },

    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    /// Create an unknown-system error listing what is available.
    pub fn unknown_system<I, S>(requested: impl Into<String>, known: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::UnknownSystem {
            requested: requested.into(),
            known: known.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a validation error for rule violations.
    ///
    /// # Example
    /// ```ignore
    /// if system_id.is_empty() {
    ///     return Err(DomainError::validation("system id cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_system_lists_known() {
        let err = DomainError::unknown_system("gurps", ["dnd5e", "pbta"]);
        assert!(matches!(err, DomainError::UnknownSystem { .. }));
        assert_eq!(
            err.to_string(),
            "Unknown rule system 'gurps' (known systems: dnd5e, pbta)"
        );
    }

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("system id cannot be empty");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Validation failed: system id cannot be empty");
    }
}
