//! One-line rendering of property values for tables and summaries

use crate::edit_value::EditValue;
use crate::validate::decode_blob;
use crate::value_type::ValueType;
use dsadmin_core::value::property_to_json;
use dsadmin_core::{key_to_string, PropertyValue, Value};

/// Whether decoded blob bytes can be shown as text
///
/// Accepts tab, CR, LF and the range `0x20..=0x7F`.
pub fn is_printable(bytes: &[u8]) -> bool {
    bytes
        .iter()
        .all(|&b| matches!(b, b'\r' | b'\n' | b'\t' | 0x20..=0x7F))
}

/// Render a wire value as a single display string
pub fn value_to_string(value: &PropertyValue, project: &str, namespace: Option<&str>) -> String {
    match &value.value {
        Value::Null => "null".to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Integer(text) | Value::Timestamp(text) | Value::String(text) => text.clone(),
        Value::Double(f) => f.to_string(),
        Value::Key(key) => key_to_string(key, project, namespace),
        Value::GeoPoint(point) => {
            format!("lat: {}, lon: {}", point.latitude(), point.longitude())
        }
        Value::Array(values) => format!(
            "[{}]",
            values
                .iter()
                .map(|v| value_to_string(v, project, namespace))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        Value::Blob(text) => blob_to_string(text),
        Value::Entity(_) => property_to_json(value).to_string(),
    }
}

/// Render the field an edit value currently selects
pub fn edit_value_to_string(edit: &EditValue, project: &str, namespace: Option<&str>) -> String {
    match edit.value_type {
        ValueType::Timestamp
        | ValueType::String
        | ValueType::Integer
        | ValueType::Double
        | ValueType::Blob
        | ValueType::Key => edit.string_value.clone(),
        ValueType::Null => "null".to_string(),
        ValueType::Boolean => edit.boolean_value.to_string(),
        ValueType::GeoPoint => format!(
            "lat: {}, lon: {}",
            edit.geo_point_value.latitude, edit.geo_point_value.longitude
        ),
        ValueType::Array => format!(
            "[{}]",
            edit.array_value
                .iter()
                .map(|e| edit_value_to_string(e, project, namespace))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        ValueType::Entity => match edit.retained.as_deref() {
            Some(retained) => value_to_string(retained, project, namespace),
            None => edit.string_value.clone(),
        },
    }
}

fn blob_to_string(encoded: &str) -> String {
    match decode_blob(encoded) {
        Some(bytes) if is_printable(&bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Some(bytes) => format!("blob ({} bytes)", bytes.len()),
        None => encoded.to_string(),
    }
}
