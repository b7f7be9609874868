//! Form-editable shadow of a property value
//!
//! An [`EditValue`] keeps a scratch field for *every* value type at once: a
//! string buffer (timestamp, string, key, integer, double and blob all edit as
//! text), a boolean, a pair of geopoint coordinate strings and a list of nested
//! edit values. Only the field(s) selected by `value_type` are read when the
//! value is converted back to the wire.
//!
//! ## Switching types keeps input
//!
//! [`EditValue::set_type`] changes only the discriminant. Text typed while the
//! field was a String is still there if the user switches to Integer and back,
//! and an array's elements survive a detour through Null.

use crate::validate::format_timestamp;
use crate::value_type::ValueType;
use chrono::Utc;
use dsadmin_core::PropertyValue;
use serde::{Deserialize, Serialize};

/// Geopoint coordinates as typed text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoPointEdit {
    /// Latitude text
    pub latitude: String,
    /// Longitude text
    pub longitude: String,
}

/// Editable property value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditValue {
    /// Selected type
    #[serde(rename = "type")]
    pub value_type: ValueType,
    /// Exclude-from-indexes flag, passed through unchanged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_from_indexes: Option<bool>,
    /// Meaning code, passed through unchanged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meaning: Option<i32>,
    /// Text buffer shared by all text-edited types
    #[serde(default)]
    pub string_value: String,
    /// Boolean buffer
    #[serde(default)]
    pub boolean_value: bool,
    /// Geopoint buffer
    #[serde(default)]
    pub geo_point_value: GeoPointEdit,
    /// Array elements
    #[serde(default)]
    pub array_value: Vec<EditValue>,
    /// Original value kept for types that cannot be edited (embedded entities)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retained: Option<Box<PropertyValue>>,
}

impl Default for EditValue {
    fn default() -> Self {
        Self {
            value_type: ValueType::String,
            exclude_from_indexes: None,
            meaning: None,
            string_value: String::new(),
            boolean_value: false,
            geo_point_value: GeoPointEdit::default(),
            array_value: Vec::new(),
            retained: None,
        }
    }
}

impl EditValue {
    /// Fresh edit value of the given type
    ///
    /// A new Timestamp starts at the current time.
    pub fn new(value_type: ValueType) -> Self {
        let string_value = match value_type {
            ValueType::Timestamp => format_timestamp(&Utc::now()),
            _ => String::new(),
        };
        Self {
            value_type,
            string_value,
            ..Self::default()
        }
    }

    /// Switch the selected type, keeping every scratch field
    pub fn set_type(&mut self, value_type: ValueType) {
        self.value_type = value_type;
    }

    /// Builder form of [`set_type`](Self::set_type)
    pub fn with_type(mut self, value_type: ValueType) -> Self {
        self.set_type(value_type);
        self
    }

    /// Edit value with the text buffer set
    pub fn text(value_type: ValueType, text: impl Into<String>) -> Self {
        Self {
            value_type,
            string_value: text.into(),
            ..Self::default()
        }
    }
}
