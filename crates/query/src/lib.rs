//! Paged queries and admin operations against a datastore REST endpoint
//!
//! - [`QueryPager`]: turns "page N of kind K" into dependent `runQuery` calls
//! - [`DatastoreClient`]: namespaces, kinds, entity pages, GQL, lookup, writes
//! - [`QueryBackend`] / [`DatastoreBackend`]: the remote API seam
//! - [`HttpBackend`]: JSON over HTTP via `reqwest`
//! - [`ClientConfig`]: `dsadmin.toml` / environment configuration

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod pager;
pub mod request;

pub use backend::{DatastoreBackend, QueryBackend};
pub use client::DatastoreClient;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use http::HttpBackend;
pub use pager::{PageRequest, PagerConfig, QueryPager};
pub use request::{Direction, MoreResults, Order};
