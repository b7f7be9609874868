//! Error types for key expressions
//!
//! Every failure to read a key expression surfaces as the same generic
//! `invalid key` message. The internal reason (which token was unexpected,
//! which quote was left open) is kept on the error for diagnostics but is
//! never part of its `Display` output.

use thiserror::Error;

/// Result type alias for key expression operations
pub type Result<T> = std::result::Result<T, KeyError>;

/// Error raised while lexing or parsing a key expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// The text is not a valid key expression
    #[error("invalid key")]
    InvalidKey {
        /// Internal diagnostic, not shown to users
        reason: String,
    },
}

impl KeyError {
    /// Create an `InvalidKey` error with a diagnostic reason
    pub fn invalid(reason: impl Into<String>) -> Self {
        KeyError::InvalidKey {
            reason: reason.into(),
        }
    }

    /// The internal diagnostic reason
    pub fn reason(&self) -> &str {
        match self {
            KeyError::InvalidKey { reason } => reason,
        }
    }
}
