//! Error types for the abmix proposal core
//!
//! Scoring never fails. Errors only come out of validated status transitions
//! and configuration loading, each with a code for programmatic handling.

use thiserror::Error;

use crate::schemas::ProposalStatus;

/// Result type alias for abmix operations
pub type Result<T> = std::result::Result<T, AbmixError>;

/// Main error type for all abmix operations
#[derive(Debug, Error)]
pub enum AbmixError {
    /// The transition table has no edge from `from` to `to`
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: ProposalStatus,
        to: ProposalStatus,
    },

    /// The proposal moved on since the caller last read it
    #[error("Stale status for proposal {proposal_id}: expected {expected}, found {actual}")]
    StaleStatus {
        proposal_id: String,
        expected: ProposalStatus,
        actual: ProposalStatus,
    },

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Invalid JSON format
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error with context
    #[error("{context}: {message}")]
    Wrapped { context: String, message: String },
}

impl AbmixError {
    /// Get the error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            AbmixError::InvalidTransition { .. } => "INVALID_TRANSITION",
            AbmixError::StaleStatus { .. } => "STALE_STATUS",
            AbmixError::FileNotFound(_) => "FILE_NOT_FOUND",
            AbmixError::InvalidJson(_) => "INVALID_JSON",
            AbmixError::ConfigError(_) => "CONFIG_ERROR",
            AbmixError::Io(_) => "IO_ERROR",
            AbmixError::Wrapped { .. } => "WRAPPED_ERROR",
        }
    }

    /// Wrap an error with additional context
    pub fn wrap<E: std::fmt::Display>(error: E, context: impl Into<String>) -> Self {
        AbmixError::Wrapped {
            context: context.into(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let invalid = AbmixError::InvalidTransition {
            from: ProposalStatus::Declinado,
            to: ProposalStatus::Analise,
        };
        assert_eq!(invalid.code(), "INVALID_TRANSITION");

        let stale = AbmixError::StaleStatus {
            proposal_id: "p-1".into(),
            expected: ProposalStatus::Observacao,
            actual: ProposalStatus::Analise,
        };
        assert_eq!(stale.code(), "STALE_STATUS");
        assert_eq!(AbmixError::FileNotFound("x".into()).code(), "FILE_NOT_FOUND");
        assert_eq!(AbmixError::InvalidJson("x".into()).code(), "INVALID_JSON");
        assert_eq!(AbmixError::ConfigError("x".into()).code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_transition_error_message_uses_identifiers() {
        let err = AbmixError::InvalidTransition {
            from: ProposalStatus::Observacao,
            to: ProposalStatus::Implantado,
        };
        assert_eq!(err.to_string(), "Invalid status transition: observacao -> implantado");
    }

    #[test]
    fn test_wrap_error() {
        let wrapped = AbmixError::wrap("inner error", "outer context");
        assert_eq!(wrapped.code(), "WRAPPED_ERROR");
        assert!(wrapped.to_string().contains("outer context"));
        assert!(wrapped.to_string().contains("inner error"));
    }
}
