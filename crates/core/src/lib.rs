//! Core types for dsadmin
//!
//! This crate defines the data model shared by the editing and query layers:
//! - Key: entity address (partition + ancestor path)
//! - PropertyValue: closed enum of the 11 property value variants with metadata
//! - Entity: key plus named properties
//! - Key expressions: `key(Kind, 1, Child, 'name')` text notation
//! - KeyError: error type for key expressions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entity;
pub mod error;
pub mod expr;
pub mod key;
pub mod value;

pub use entity::{Entity, Properties};
pub use error::{KeyError, Result};
pub use expr::{key_from_string, key_to_string, parse, tokenize, KeyExpr, Token};
pub use key::{Key, PartitionId, PathElement, PathId};
pub use value::{GeoPoint, PropertyValue, Value};
