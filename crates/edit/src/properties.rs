//! Whole-entity property conversion
//!
//! An edit form holds one [`EditValue`] per property name. A `None` entry
//! marks a property the user removed; it is dropped on save.

use crate::codec::{edit_to_value, value_to_edit};
use crate::edit_value::EditValue;
use dsadmin_core::Properties;
use std::collections::BTreeMap;
use tracing::debug;

/// Edit state of an entity's properties, keyed by property name
pub type EditProperties = BTreeMap<String, Option<EditValue>>;

/// Build edit state for every property of an entity
pub fn to_edit_properties(
    properties: &Properties,
    project: &str,
    namespace: Option<&str>,
) -> EditProperties {
    properties
        .iter()
        .map(|(name, value)| (name.clone(), Some(value_to_edit(value, project, namespace))))
        .collect()
}

/// Convert edit state back to wire properties
///
/// Removed entries are skipped. Returns `None` if any remaining property fails
/// validation; use [`invalid_properties`] to find which.
pub fn from_edit_properties(
    properties: &EditProperties,
    project: &str,
    namespace: Option<&str>,
) -> Option<Properties> {
    let mut result = Properties::new();
    for (name, edit) in properties {
        let Some(edit) = edit else { continue };
        match edit_to_value(edit, project, namespace) {
            Some(value) => {
                result.insert(name.clone(), value);
            }
            None => {
                debug!(target: "dsadmin::edit", property = %name, value_type = %edit.value_type, "Property failed validation");
                return None;
            }
        }
    }
    Some(result)
}

/// Names of the properties that fail validation, in name order
pub fn invalid_properties(
    properties: &EditProperties,
    project: &str,
    namespace: Option<&str>,
) -> Vec<String> {
    properties
        .iter()
        .filter_map(|(name, edit)| edit.as_ref().map(|e| (name, e)))
        .filter(|(_, edit)| edit_to_value(edit, project, namespace).is_none())
        .map(|(name, _)| name.clone())
        .collect()
}
