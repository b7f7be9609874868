//! PropertyValue ⇄ EditValue conversion
//!
//! | Type | Edit field | Validation on the way back |
//! |------|-----------|----------------------------|
//! | Null | - | always succeeds |
//! | Boolean | `boolean_value` | always succeeds |
//! | String | `string_value` | always succeeds |
//! | Timestamp | `string_value` | must parse; UTC text kept, other forms converted to UTC |
//! | Integer | `string_value` | `^[0-9]+$` |
//! | Double | `string_value` | numeric, not NaN |
//! | Blob | `string_value` | standard base64, padding optional |
//! | Key | `string_value` | key expression |
//! | GeoPoint | `geo_point_value` | both axes numeric; a 0 axis is omitted |
//! | Array | `array_value` | every element valid |
//! | Entity | `retained` | must have been retained |
//!
//! [`edit_to_value`] returns `None` on any validation failure so the caller
//! can flag the one property and keep the rest of the form intact.

use crate::edit_value::{EditValue, GeoPointEdit};
use crate::validate::{canonical_timestamp, decode_blob, parse_double, parse_integer};
use crate::value_type::ValueType;
use dsadmin_core::{key_from_string, key_to_string, GeoPoint, PropertyValue, Value};

/// Build the edit form state for a property value
pub fn value_to_edit(value: &PropertyValue, project: &str, namespace: Option<&str>) -> EditValue {
    let mut edit = EditValue {
        value_type: ValueType::of(&value.value),
        exclude_from_indexes: value.exclude_from_indexes,
        meaning: value.meaning,
        ..EditValue::default()
    };

    match &value.value {
        Value::Null => {}
        Value::Boolean(b) => edit.boolean_value = *b,
        Value::Integer(text)
        | Value::Timestamp(text)
        | Value::String(text)
        | Value::Blob(text) => edit.string_value = text.clone(),
        Value::Double(f) => edit.string_value = f.to_string(),
        Value::Key(key) => edit.string_value = key_to_string(key, project, namespace),
        Value::GeoPoint(point) => {
            edit.geo_point_value = GeoPointEdit {
                latitude: point.latitude().to_string(),
                longitude: point.longitude().to_string(),
            }
        }
        Value::Array(values) => {
            edit.array_value = values
                .iter()
                .map(|v| value_to_edit(v, project, namespace))
                .collect()
        }
        Value::Entity(json) => {
            edit.string_value = json.to_string();
            edit.retained = Some(Box::new(value.clone()));
        }
    }

    edit
}

/// Validate an edit value and convert it back to a property value
///
/// Returns `None` if the field selected by `value_type` does not validate.
pub fn edit_to_value(
    edit: &EditValue,
    project: &str,
    namespace: Option<&str>,
) -> Option<PropertyValue> {
    let value = match edit.value_type {
        ValueType::Null => Value::Null,
        ValueType::Boolean => Value::Boolean(edit.boolean_value),
        ValueType::String => Value::String(edit.string_value.clone()),
        ValueType::Timestamp => Value::Timestamp(canonical_timestamp(&edit.string_value)?),
        ValueType::Integer => Value::Integer(parse_integer(&edit.string_value)?),
        ValueType::Double => Value::Double(parse_double(&edit.string_value)?),
        ValueType::Blob => {
            decode_blob(&edit.string_value)?;
            Value::Blob(edit.string_value.clone())
        }
        ValueType::Key => Value::Key(key_from_string(&edit.string_value, project, namespace).ok()?),
        ValueType::GeoPoint => {
            let latitude = parse_double(&edit.geo_point_value.latitude)?;
            let longitude = parse_double(&edit.geo_point_value.longitude)?;
            Value::GeoPoint(GeoPoint {
                latitude: Some(latitude).filter(|v| *v != 0.0),
                longitude: Some(longitude).filter(|v| *v != 0.0),
            })
        }
        ValueType::Array => Value::Array(
            edit.array_value
                .iter()
                .map(|e| edit_to_value(e, project, namespace))
                .collect::<Option<Vec<_>>>()?,
        ),
        ValueType::Entity => edit.retained.as_deref()?.value.clone(),
    };

    Some(PropertyValue {
        value,
        exclude_from_indexes: edit.exclude_from_indexes,
        meaning: edit.meaning,
    })
}
