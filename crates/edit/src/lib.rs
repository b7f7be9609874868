//! Edit-form model for property values
//!
//! - [`EditValue`]: form state that keeps every per-type field at once
//! - [`value_to_edit`] / [`edit_to_value`]: the codec between wire values and
//!   form state; conversion back validates and yields `None` on bad input
//! - [`value_to_string`] / [`edit_value_to_string`]: one-line rendering
//! - [`to_edit_properties`] / [`from_edit_properties`]: whole-entity helpers
//! - [`FieldIds`]: per-form element id generator

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod display;
pub mod edit_value;
pub mod ids;
pub mod properties;
pub mod validate;
pub mod value_type;

pub use codec::{edit_to_value, value_to_edit};
pub use display::{edit_value_to_string, is_printable, value_to_string};
pub use edit_value::{EditValue, GeoPointEdit};
pub use ids::FieldIds;
pub use properties::{from_edit_properties, invalid_properties, to_edit_properties, EditProperties};
pub use value_type::ValueType;
