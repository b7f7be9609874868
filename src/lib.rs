//! dsadmin - admin toolkit for hierarchical key-value datastores
//!
//! The logic underneath a datastore admin UI:
//!
//! - **Key expressions**: `key(PROJECT('p'), NAMESPACE('ns'), Parent, 'a', Child, 42)`
//!   text notation with a tokenizer, parser and canonical formatter
//! - **Edit values**: lossless conversion between wire property values and
//!   form-editable state, with per-field validation
//! - **Queries**: a pager that reconciles partial offset/limit handling across
//!   dependent calls, plus an admin client over the REST API
//!
//! # Quick Start
//!
//! ```ignore
//! use dsadmin::{key_from_string, key_to_string, ClientConfig, DatastoreClient, PageRequest};
//!
//! let key = key_from_string("key(Task, 'groceries')", "my-project", None)?;
//! assert_eq!(key_to_string(&key, "my-project", None), "key(Task, 'groceries')");
//!
//! let client = DatastoreClient::from_config(&ClientConfig::from_env())?;
//! let page = client.entities(&PageRequest::new("Task", 20).page(2)).await?;
//! ```
//!
//! # Crates
//!
//! | Crate | Contents |
//! |-------|----------|
//! | `dsadmin-core` | keys, property values, entities, key expressions |
//! | `dsadmin-edit` | edit values, codec, validators, display |
//! | `dsadmin-query` | pager, admin client, HTTP backend, config |

// Key expressions and the wire data model
pub use dsadmin_core::{
    key_from_string, key_to_string, parse, tokenize, Entity, GeoPoint, Key, KeyError, KeyExpr,
    PartitionId, PathElement, PathId, Properties, PropertyValue, Token, Value,
};

// Edit-form model
pub use dsadmin_edit::{
    edit_to_value, edit_value_to_string, from_edit_properties, invalid_properties, is_printable,
    to_edit_properties, value_to_edit, value_to_string, EditProperties, EditValue, FieldIds,
    GeoPointEdit, ValueType,
};

// Queries and admin operations
pub use dsadmin_query::{
    ClientConfig, DatastoreBackend, DatastoreClient, Direction, Error, HttpBackend, MoreResults,
    Order, PageRequest, PagerConfig, QueryBackend, QueryPager, Result,
};

/// Full module trees of the member crates
pub mod crates {
    pub use dsadmin_core as core;
    pub use dsadmin_edit as edit;
    pub use dsadmin_query as query;
}
