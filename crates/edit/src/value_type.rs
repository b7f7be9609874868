//! Property value type discriminant

use dsadmin_core::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The 11 property value types, in the order a type picker lists them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    /// Null
    Null,
    /// RFC3339 timestamp
    Timestamp,
    /// Text
    String,
    /// Entity key
    Key,
    /// Boolean
    Boolean,
    /// Decimal integer
    Integer,
    /// Float
    Double,
    /// Latitude/longitude
    GeoPoint,
    /// List of values
    Array,
    /// Base64 bytes
    Blob,
    /// Embedded entity (read-only)
    Entity,
}

impl ValueType {
    /// Every type, in picker order
    pub const ALL: [ValueType; 11] = [
        ValueType::Timestamp,
        ValueType::String,
        ValueType::Key,
        ValueType::Null,
        ValueType::Boolean,
        ValueType::Integer,
        ValueType::Double,
        ValueType::GeoPoint,
        ValueType::Array,
        ValueType::Blob,
        ValueType::Entity,
    ];

    /// Type of a wire value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueType::Null,
            Value::Boolean(_) => ValueType::Boolean,
            Value::Integer(_) => ValueType::Integer,
            Value::Double(_) => ValueType::Double,
            Value::Timestamp(_) => ValueType::Timestamp,
            Value::String(_) => ValueType::String,
            Value::Blob(_) => ValueType::Blob,
            Value::GeoPoint(_) => ValueType::GeoPoint,
            Value::Key(_) => ValueType::Key,
            Value::Array(_) => ValueType::Array,
            Value::Entity(_) => ValueType::Entity,
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Null => "Null",
            ValueType::Timestamp => "Timestamp",
            ValueType::String => "String",
            ValueType::Key => "Key",
            ValueType::Boolean => "Boolean",
            ValueType::Integer => "Integer",
            ValueType::Double => "Double",
            ValueType::GeoPoint => "GeoPoint",
            ValueType::Array => "Array",
            ValueType::Blob => "Blob",
            ValueType::Entity => "Entity",
        }
    }

    /// Whether a form may offer this type for input
    ///
    /// Embedded entities are carried through unchanged but cannot be typed in.
    pub fn is_editable(self) -> bool {
        !matches!(self, ValueType::Entity)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
