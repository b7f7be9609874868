//! Error types for remote datastore operations
//!
//! | Category | Variants |
//! |----------|----------|
//! | Remote | `Api`, `Transport` |
//! | Decoding | `Serialization` |
//! | Lookup | `EntityNotFound` |
//! | Caller | `InvalidInput`, `Config` |
//! | Pager | `TooManyCalls` |

use serde::Deserialize;

/// Result type for query and admin operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from the query layer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The API answered with an error status
    #[error("api error {code} ({status}): {message}")]
    Api {
        /// HTTP or RPC status code
        code: u16,
        /// Canonical status name, e.g. `INVALID_ARGUMENT`
        status: String,
        /// Human-readable message
        message: String,
    },

    /// The request never produced a response
    #[error("transport error: {reason}")]
    Transport {
        /// Underlying failure
        reason: String,
    },

    /// A body could not be encoded or decoded
    #[error("serialization error: {reason}")]
    Serialization {
        /// Underlying failure
        reason: String,
    },

    /// Lookup found no entity for the key
    #[error("entity not found")]
    EntityNotFound,

    /// The caller passed an unusable argument
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong
        reason: String,
    },

    /// A paged fetch ran out of its call budget before completing
    #[error("query did not complete within {calls} calls")]
    TooManyCalls {
        /// Calls issued
        calls: u32,
    },

    /// Configuration could not be loaded or is incomplete
    #[error("config error: {reason}")]
    Config {
        /// What was wrong
        reason: String,
    },
}

impl Error {
    /// Build an [`Error::InvalidInput`]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Error::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Build an [`Error::Config`]
    pub fn config(reason: impl Into<String>) -> Self {
        Error::Config {
            reason: reason.into(),
        }
    }

    /// Decode an error response body
    ///
    /// The API reports failures as `{"error": {"code", "message", "status"}}`.
    /// Bodies in any other shape are kept verbatim as the message.
    pub fn from_api_body(http_status: u16, body: &str) -> Self {
        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(ApiErrorBody { error }) => Error::Api {
                code: error.code.unwrap_or(http_status),
                status: error.status,
                message: error.message,
            },
            Err(_) => Error::Api {
                code: http_status,
                status: String::new(),
                message: body.trim().to_string(),
            },
        }
    }

    /// Whether this is an [`Error::Api`] carrying the given status name
    pub fn is_status(&self, name: &str) -> bool {
        matches!(self, Error::Api { status, .. } if status == name)
    }
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiStatus,
}

#[derive(Deserialize)]
struct ApiStatus {
    #[serde(default)]
    code: Option<u16>,
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Error::Serialization {
                reason: e.to_string(),
            }
        } else {
            Error::Transport {
                reason: e.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization {
            reason: e.to_string(),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config {
            reason: e.to_string(),
        }
    }
}
