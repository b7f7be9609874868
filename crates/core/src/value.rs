//! Property value types
//!
//! This module defines:
//! - [`Value`]: closed enum of the 11 property value variants
//! - [`PropertyValue`]: a `Value` plus its index/meaning metadata
//! - [`GeoPoint`]: latitude/longitude pair
//!
//! ## Wire encoding
//!
//! On the wire a property value is a JSON object holding exactly one of the
//! variant keys plus optional metadata siblings:
//!
//! | Variant | JSON |
//! |---------|------|
//! | Null | `{"nullValue": null}` |
//! | Boolean | `{"booleanValue": true}` |
//! | Integer | `{"integerValue": "42"}` (decimal string, any magnitude) |
//! | Double | `{"doubleValue": 4.2}` (`"NaN"`, `"Infinity"`, `"-Infinity"` for non-finite) |
//! | Timestamp | `{"timestampValue": "2021-02-16T18:33:09.31Z"}` |
//! | String | `{"stringValue": "..."}` |
//! | Blob | `{"blobValue": "<base64>"}` |
//! | GeoPoint | `{"geoPointValue": {"latitude": 1.5, "longitude": 2}}` |
//! | Key | `{"keyValue": {...}}` |
//! | Array | `{"arrayValue": {"values": [...]}}` (`{}` when empty) |
//! | Entity | `{"entityValue": {...}}` (kept opaque) |
//!
//! Metadata: `"excludeFromIndexes": bool`, `"meaning": int`.

use crate::key::Key;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};

/// Property value payload
///
/// The variant set is fixed; code that inspects a value matches exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null
    Null,
    /// Boolean
    Boolean(bool),
    /// Integer as an unsigned-or-signed decimal string
    Integer(String),
    /// 64-bit float
    Double(f64),
    /// RFC3339 timestamp string
    Timestamp(String),
    /// UTF-8 string
    String(String),
    /// Base64-encoded bytes
    Blob(String),
    /// Geographic point
    GeoPoint(GeoPoint),
    /// Reference to another entity
    Key(Key),
    /// Ordered list of values
    Array(Vec<PropertyValue>),
    /// Embedded entity, carried verbatim
    Entity(JsonValue),
}

/// Geographic point; an omitted axis reads as 0
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl GeoPoint {
    /// Latitude, 0 when omitted
    pub fn latitude(&self) -> f64 {
        self.latitude.unwrap_or(0.0)
    }

    /// Longitude, 0 when omitted
    pub fn longitude(&self) -> f64 {
        self.longitude.unwrap_or(0.0)
    }
}

/// A property value with its metadata
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyValue {
    /// The typed payload
    pub value: Value,
    /// Exclude this value from indexes
    pub exclude_from_indexes: Option<bool>,
    /// Opaque meaning code
    pub meaning: Option<i32>,
}

impl PropertyValue {
    /// Wrap a value with no metadata
    pub fn new(value: Value) -> Self {
        Self {
            value,
            exclude_from_indexes: None,
            meaning: None,
        }
    }

    /// Set the exclude-from-indexes flag
    pub fn excluded_from_indexes(mut self, exclude: bool) -> Self {
        self.exclude_from_indexes = Some(exclude);
        self
    }

    /// Set the meaning code
    pub fn with_meaning(mut self, meaning: i32) -> Self {
        self.meaning = Some(meaning);
        self
    }

    /// JSON key naming this value's variant
    pub fn type_key(&self) -> &'static str {
        match &self.value {
            Value::Null => "nullValue",
            Value::Boolean(_) => "booleanValue",
            Value::Integer(_) => "integerValue",
            Value::Double(_) => "doubleValue",
            Value::Timestamp(_) => "timestampValue",
            Value::String(_) => "stringValue",
            Value::Blob(_) => "blobValue",
            Value::GeoPoint(_) => "geoPointValue",
            Value::Key(_) => "keyValue",
            Value::Array(_) => "arrayValue",
            Value::Entity(_) => "entityValue",
        }
    }
}

impl From<Value> for PropertyValue {
    fn from(value: Value) -> Self {
        PropertyValue::new(value)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i.to_string())
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Double(f)
    }
}

impl From<Key> for Value {
    fn from(k: Key) -> Self {
        Value::Key(k)
    }
}

// ============================================================================
// JSON conversion
// ============================================================================

const VALUE_KEYS: [&str; 11] = [
    "nullValue",
    "booleanValue",
    "integerValue",
    "doubleValue",
    "timestampValue",
    "stringValue",
    "blobValue",
    "geoPointValue",
    "keyValue",
    "arrayValue",
    "entityValue",
];

/// Convert a property value to its wire JSON object.
pub fn property_to_json(value: &PropertyValue) -> JsonValue {
    let mut obj = Map::new();
    let payload = match &value.value {
        Value::Null => JsonValue::Null,
        Value::Boolean(b) => JsonValue::Bool(*b),
        Value::Integer(i) => JsonValue::String(i.clone()),
        Value::Double(f) => double_to_json(*f),
        Value::Timestamp(t) => JsonValue::String(t.clone()),
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Blob(b) => JsonValue::String(b.clone()),
        Value::GeoPoint(g) => serde_json::to_value(g).unwrap_or(JsonValue::Null),
        Value::Key(k) => serde_json::to_value(k).unwrap_or(JsonValue::Null),
        Value::Array(values) => {
            let mut array = Map::new();
            if !values.is_empty() {
                array.insert(
                    "values".to_string(),
                    JsonValue::Array(values.iter().map(property_to_json).collect()),
                );
            }
            JsonValue::Object(array)
        }
        Value::Entity(e) => e.clone(),
    };
    obj.insert(value.type_key().to_string(), payload);
    if let Some(exclude) = value.exclude_from_indexes {
        obj.insert("excludeFromIndexes".to_string(), JsonValue::Bool(exclude));
    }
    if let Some(meaning) = value.meaning {
        obj.insert("meaning".to_string(), JsonValue::from(meaning));
    }
    JsonValue::Object(obj)
}

/// Convert a wire JSON object to a property value.
///
/// The object must carry exactly one variant key. Unknown sibling keys are
/// ignored.
pub fn property_from_json(json: &JsonValue) -> Result<PropertyValue, String> {
    let obj = json
        .as_object()
        .ok_or_else(|| "property value must be an object".to_string())?;

    let mut present = VALUE_KEYS.iter().filter(|k| obj.contains_key(**k));
    let type_key = match (present.next(), present.next()) {
        (Some(k), None) => *k,
        (None, _) => return Err("property value has no value field".to_string()),
        (Some(a), Some(b)) => {
            return Err(format!("property value has both '{}' and '{}'", a, b));
        }
    };
    let payload = &obj[type_key];

    let value = match type_key {
        "nullValue" => Value::Null,
        "booleanValue" => Value::Boolean(
            payload
                .as_bool()
                .ok_or_else(|| "booleanValue must be a boolean".to_string())?,
        ),
        "integerValue" => Value::Integer(match payload {
            JsonValue::String(s) => s.clone(),
            JsonValue::Number(n) if n.is_i64() || n.is_u64() => n.to_string(),
            _ => return Err("integerValue must be a decimal string".to_string()),
        }),
        "doubleValue" => Value::Double(double_from_json(payload)?),
        "timestampValue" => Value::Timestamp(string_payload(payload, type_key)?),
        "stringValue" => Value::String(string_payload(payload, type_key)?),
        "blobValue" => Value::Blob(string_payload(payload, type_key)?),
        "geoPointValue" => Value::GeoPoint(
            serde_json::from_value(payload.clone())
                .map_err(|e| format!("invalid geoPointValue: {}", e))?,
        ),
        "keyValue" => Value::Key(
            serde_json::from_value(payload.clone())
                .map_err(|e| format!("invalid keyValue: {}", e))?,
        ),
        "arrayValue" => {
            let values = match payload.get("values") {
                None | Some(JsonValue::Null) => Vec::new(),
                Some(JsonValue::Array(items)) => items
                    .iter()
                    .map(property_from_json)
                    .collect::<Result<Vec<_>, _>>()?,
                Some(_) => return Err("arrayValue.values must be an array".to_string()),
            };
            Value::Array(values)
        }
        _ => Value::Entity(payload.clone()),
    };

    let exclude_from_indexes = match obj.get("excludeFromIndexes") {
        None | Some(JsonValue::Null) => None,
        Some(JsonValue::Bool(b)) => Some(*b),
        Some(_) => return Err("excludeFromIndexes must be a boolean".to_string()),
    };
    let meaning = match obj.get("meaning") {
        None | Some(JsonValue::Null) => None,
        Some(m) => Some(
            m.as_i64()
                .and_then(|m| i32::try_from(m).ok())
                .ok_or_else(|| "meaning must be a 32-bit integer".to_string())?,
        ),
    };

    Ok(PropertyValue {
        value,
        exclude_from_indexes,
        meaning,
    })
}

fn string_payload(payload: &JsonValue, type_key: &str) -> Result<String, String> {
    payload
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| format!("{} must be a string", type_key))
}

/// Non-finite doubles travel as strings, as the REST API encodes them.
fn double_to_json(f: f64) -> JsonValue {
    if f.is_nan() {
        JsonValue::String("NaN".to_string())
    } else if f.is_infinite() {
        if f.is_sign_positive() {
            JsonValue::String("Infinity".to_string())
        } else {
            JsonValue::String("-Infinity".to_string())
        }
    } else {
        serde_json::Number::from_f64(f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null)
    }
}

fn double_from_json(payload: &JsonValue) -> Result<f64, String> {
    match payload {
        JsonValue::Number(n) => n
            .as_f64()
            .ok_or_else(|| "doubleValue out of range".to_string()),
        JsonValue::String(s) => match s.as_str() {
            "NaN" => Ok(f64::NAN),
            "Infinity" => Ok(f64::INFINITY),
            "-Infinity" => Ok(f64::NEG_INFINITY),
            other => Err(format!("invalid doubleValue: {}", other)),
        },
        _ => Err("doubleValue must be a number".to_string()),
    }
}

impl Serialize for PropertyValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        property_to_json(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PropertyValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let json = JsonValue::deserialize(deserializer)?;
        property_from_json(&json).map_err(de::Error::custom)
    }
}
