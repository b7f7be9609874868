//! PropertyValue ⇄ EditValue conversion over whole entities and wire JSON

#[path = "../common/mod.rs"]
mod common;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use common::{partition, PROJECT};
use dsadmin::{
    edit_to_value, from_edit_properties, invalid_properties, to_edit_properties, value_to_edit,
    value_to_string, EditValue, Entity, GeoPoint, Key, PathElement, Properties, PropertyValue,
    Value, ValueType,
};
use proptest::prelude::*;
use serde_json::json;

fn round_trip(value: &PropertyValue, namespace: Option<&str>) -> Option<PropertyValue> {
    edit_to_value(&value_to_edit(value, PROJECT, namespace), PROJECT, namespace)
}

#[test]
fn wire_entity_survives_edit_round_trip() {
    let entity: Entity = serde_json::from_value(json!({
        "key": {"partitionId": {"projectId": PROJECT}, "path": [{"kind": "User", "name": "ada"}]},
        "properties": {
            "name": {"stringValue": "Ada"},
            "born": {"timestampValue": "1815-12-10T00:00:00.000Z"},
            "score": {"doubleValue": 99.5, "excludeFromIndexes": true},
            "visits": {"integerValue": "9007199254740993"},
            "avatar": {"blobValue": "iVBORw0KGgo=", "meaning": 22},
            "home": {"geoPointValue": {"latitude": 51.5, "longitude": -0.12}},
            "manager": {"keyValue": {"partitionId": {"projectId": PROJECT}, "path": [{"kind": "User", "id": "1"}]}},
            "tags": {"arrayValue": {"values": [{"stringValue": "math"}, {"nullValue": null}]}},
            "none": {"arrayValue": {}},
            "address": {"entityValue": {"properties": {"city": {"stringValue": "London"}}}},
            "active": {"booleanValue": true}
        }
    }))
    .unwrap();

    let edit = to_edit_properties(&entity.properties, PROJECT, None);
    assert_eq!(edit["manager"].as_ref().unwrap().string_value, "key(User, 1)");

    let back = from_edit_properties(&edit, PROJECT, None).unwrap();
    assert_eq!(back, entity.properties);

    let json = serde_json::to_value(Entity::new(entity.key.clone(), back)).unwrap();
    assert_eq!(json["properties"]["visits"], json!({"integerValue": "9007199254740993"}));
    assert_eq!(json["properties"]["none"], json!({"arrayValue": {}}));
}

#[test]
fn invalid_blob_marks_only_that_property() {
    let mut properties = Properties::new();
    properties.insert("title".into(), PropertyValue::new(Value::String("draft".into())));
    properties.insert("count".into(), PropertyValue::new(Value::Integer("3".into())));
    properties.insert("payload".into(), PropertyValue::new(Value::Blob(BASE64.encode(b"ok"))));

    let mut edit = to_edit_properties(&properties, PROJECT, None);
    edit.get_mut("payload")
        .and_then(Option::as_mut)
        .unwrap()
        .string_value = "***not base64***".into();
    let snapshot = edit.clone();

    let payload = edit["payload"].as_ref().unwrap();
    assert_eq!(edit_to_value(payload, PROJECT, None), None);
    assert_eq!(from_edit_properties(&edit, PROJECT, None), None);
    assert_eq!(invalid_properties(&edit, PROJECT, None), vec!["payload".to_string()]);
    assert_eq!(edit, snapshot);

    for name in ["title", "count"] {
        let sibling = edit[name].as_ref().unwrap();
        assert_eq!(
            edit_to_value(sibling, PROJECT, None).as_ref(),
            properties.get(name)
        );
    }

    edit.insert("payload".into(), None);
    let saved = from_edit_properties(&edit, PROJECT, None).unwrap();
    assert_eq!(saved.len(), 2);
}

#[test]
fn key_values_follow_ambient_namespace() {
    let key = Key::with_name(partition(Some("prod")), "Team", "core")
        .child(PathElement::with_id("Member", 4));
    let value = PropertyValue::new(Value::Key(key.clone()));

    let in_prod = value_to_edit(&value, PROJECT, Some("prod"));
    assert_eq!(in_prod.string_value, "key(Team, 'core', Member, 4)");

    let elsewhere = value_to_edit(&value, PROJECT, None);
    assert_eq!(elsewhere.string_value, "key(NAMESPACE('prod'), Team, 'core', Member, 4)");

    assert_eq!(round_trip(&value, Some("prod")), Some(value.clone()));
    assert_eq!(round_trip(&value, None), Some(value));
}

#[test]
fn type_switch_preserves_typed_text() {
    let mut edit = EditValue::new(ValueType::String);
    edit.string_value = "2021-02-16T18:33:09Z".into();
    edit.set_type(ValueType::Boolean);
    edit.set_type(ValueType::Timestamp);
    assert_eq!(
        edit_to_value(&edit, PROJECT, None).map(|v| v.value),
        Some(Value::Timestamp("2021-02-16T18:33:09Z".into()))
    );
}

#[test]
fn display_of_nested_values() {
    let value = PropertyValue::new(Value::Array(vec![
        PropertyValue::new(Value::GeoPoint(GeoPoint {
            latitude: Some(1.5),
            longitude: None,
        })),
        PropertyValue::new(Value::Blob(BASE64.encode([0u8, 159, 146, 150]))),
    ]));
    assert_eq!(
        value_to_string(&value, PROJECT, None),
        "[lat: 1.5, lon: 0, blob (4 bytes)]"
    );
}

// ============================================================================
// Round trip
// ============================================================================

fn nonzero_axis() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        Just(None),
        (-90.0f64..90.0).prop_filter("zero axis is omitted", |v| *v != 0.0).prop_map(Some),
    ]
}

fn timestamp() -> impl Strategy<Value = String> {
    let fraction = prop_oneof![Just(String::new()), "[0-9]{1,9}".prop_map(|d| format!(".{}", d))];
    (1970i32..2100, 1u32..13, 1u32..29, 0u32..24, 0u32..60, 0u32..60, fraction).prop_map(
        |(y, mo, d, h, mi, s, fraction)| {
            format!("{:04}-{:02}-{:02}T{:02}:{:02}:{:02}{}Z", y, mo, d, h, mi, s, fraction)
        },
    )
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Boolean),
        "[0-9]{1,30}".prop_map(Value::Integer),
        proptest::num::f64::NORMAL.prop_map(Value::Double),
        timestamp().prop_map(Value::Timestamp),
        ".{0,20}".prop_map(Value::String),
        prop::collection::vec(any::<u8>(), 0..32).prop_map(|b| Value::Blob(BASE64.encode(b))),
        prop::collection::vec(any::<u8>(), 0..32)
            .prop_map(|b| Value::Blob(BASE64.encode(b).trim_end_matches('=').to_string())),
        (nonzero_axis(), nonzero_axis())
            .prop_map(|(latitude, longitude)| Value::GeoPoint(GeoPoint { latitude, longitude })),
        ("[A-Za-z]{1,8}", "[a-z0-9]{1,8}").prop_map(|(kind, name)| {
            Value::Key(Key::with_name(partition(None), kind, name))
        }),
    ]
}

fn property_value() -> impl Strategy<Value = PropertyValue> {
    let metadata = (proptest::option::of(any::<bool>()), proptest::option::of(0i32..30));
    let leaf = (scalar(), metadata.clone()).prop_map(|(value, (exclude, meaning))| PropertyValue {
        value,
        exclude_from_indexes: exclude,
        meaning,
    });
    leaf.prop_recursive(2, 12, 4, move |inner| {
        (prop::collection::vec(inner, 0..4), metadata.clone()).prop_map(
            |(values, (exclude, meaning))| PropertyValue {
                value: Value::Array(values),
                exclude_from_indexes: exclude,
                meaning,
            },
        )
    })
}

proptest! {
    #[test]
    fn edit_round_trip_is_identity(value in property_value()) {
        prop_assert_eq!(round_trip(&value, None), Some(value));
    }

    #[test]
    fn edit_state_serializes(value in property_value()) {
        let edit = value_to_edit(&value, PROJECT, None);
        let json = serde_json::to_string(&edit).unwrap();
        let back: EditValue = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, edit);
    }
}
