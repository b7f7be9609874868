//! Key expression language
//!
//! A compact textual notation for entity keys:
//!
//! ```text
//! key( [PROJECT('proj'),] [NAMESPACE('ns'),] Kind, id_or_'name' (, Kind, id_or_'name')* )
//! ```
//!
//! - [`lexer`]: text → tokens
//! - [`parser`]: tokens → [`KeyExpr`]
//! - [`format`]: [`Key`] → canonical text
//!
//! [`key_from_string`] and [`key_to_string`] resolve the optional
//! PROJECT/NAMESPACE overrides against an ambient project and namespace, and
//! are exact inverses: `key_from_string(&key_to_string(&k, p, n), p, n) == k`.

pub mod format;
pub mod lexer;
pub mod parser;

pub use format::key_to_string;
pub use lexer::{tokenize, Lexer, Symbol, Token};
pub use parser::parse;

use crate::error::Result;
use crate::key::{Key, PartitionId, PathElement};
use tracing::debug;

/// A parsed key expression, before resolution against an ambient partition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyExpr {
    /// `PROJECT(...)` override
    pub project: Option<String>,
    /// `NAMESPACE(...)` override; `Some("")` selects the default namespace,
    /// `None` inherits the ambient one
    pub namespace: Option<String>,
    /// Ordered path, never empty
    pub path: Vec<PathElement>,
}

impl KeyExpr {
    /// Resolve overrides against the ambient project and namespace
    pub fn resolve(self, project: &str, namespace: Option<&str>) -> Key {
        let namespace = self.namespace.as_deref().or(namespace);
        let project = self.project.as_deref().unwrap_or(project);
        Key::new(PartitionId::new(project, namespace), self.path)
    }
}

/// Parse a key expression into a wire key
///
/// # Errors
///
/// Returns [`KeyError::InvalidKey`](crate::KeyError::InvalidKey) if the text
/// is not a valid key expression.
pub fn key_from_string(input: &str, project: &str, namespace: Option<&str>) -> Result<Key> {
    let expr = parse(input).map_err(|e| {
        debug!(target: "dsadmin::key", reason = e.reason(), "Rejected key expression");
        e
    })?;
    Ok(expr.resolve(project, namespace))
}
