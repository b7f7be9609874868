//! Field id generation for edit forms

/// Generates unique element ids for one form instance
///
/// Each form owns its own generator, so ids are unique within the form and
/// two forms never share a counter.
#[derive(Debug, Clone)]
pub struct FieldIds {
    prefix: String,
    next: u64,
}

impl FieldIds {
    /// Generator producing `{prefix}-0`, `{prefix}-1`, ...
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }

    /// Next unused id
    pub fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

impl Default for FieldIds {
    fn default() -> Self {
        Self::new("field")
    }
}
