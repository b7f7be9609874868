//! Entity type

use crate::key::Key;
use crate::value::PropertyValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named property values of an entity
pub type Properties = BTreeMap<String, PropertyValue>;

/// A stored entity: its key and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity key
    pub key: Key,
    /// Properties by name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: Properties,
}

impl Entity {
    /// Create an entity
    pub fn new(key: Key, properties: Properties) -> Self {
        Self { key, properties }
    }
}
