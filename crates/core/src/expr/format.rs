//! Canonical key expression formatter

use crate::key::{normalize_namespace, Key, PathId};

/// Render a key as a key expression relative to the ambient partition
///
/// `PROJECT(...)` is emitted only when the key's project differs from
/// `project`, and `NAMESPACE(...)` only when its namespace differs from
/// `namespace` (`NAMESPACE('')` names the default namespace).
///
/// An incomplete path element renders as its kind alone, which
/// [`parse`](super::parse) rejects.
pub fn key_to_string(key: &Key, project: &str, namespace: Option<&str>) -> String {
    let mut parts = Vec::with_capacity(key.path.len() * 2 + 2);

    if key.partition_id.project_id != project {
        parts.push(format!("PROJECT({})", quote(&key.partition_id.project_id)));
    }

    let key_namespace = key.namespace();
    if key_namespace != normalize_namespace(namespace) {
        parts.push(format!("NAMESPACE({})", quote(key_namespace.unwrap_or(""))));
    }

    for element in &key.path {
        parts.push(format_kind(&element.kind));
        match &element.id {
            Some(PathId::Id(id)) => parts.push(id.clone()),
            Some(PathId::Name(name)) => parts.push(quote(name)),
            None => {}
        }
    }

    format!("key({})", parts.join(", "))
}

/// Bare kinds are non-empty runs of ASCII letters; anything else is backticked.
fn format_kind(kind: &str) -> String {
    if !kind.is_empty() && kind.chars().all(|c| c.is_ascii_alphabetic()) {
        kind.to_string()
    } else {
        format!("`{}`", kind)
    }
}

/// Single quotes unless the text itself contains one.
fn quote(text: &str) -> String {
    if text.contains('\'') {
        format!("\"{}\"", text)
    } else {
        format!("'{}'", text)
    }
}
