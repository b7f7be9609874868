//! Paged entity fetch
//!
//! A backend may honor only part of a query's offset and limit in one call.
//! [`QueryPager::fetch_page`] turns "page N of kind K" into as many dependent
//! `runQuery` calls as it takes:
//!
//! 1. Start with `offset = page * page_size`, `limit = page_size`, no cursor.
//! 2. Issue one call; append its entities in server order.
//! 3. Stop if the batch is terminal (anything but `NOT_FINISHED`) or the page
//!    is full.
//! 4. Otherwise `offset -= skipped_results`, `limit -= entities received`,
//!    resume from the batch's end cursor, and go to 2.
//!
//! Exactly one call is in flight at a time. Dropping the returned future
//! abandons the fetch: the pending call's result is discarded and no further
//! call is issued. A failed call fails the whole fetch; no partial page is
//! returned.

use crate::backend::QueryBackend;
use crate::error::{Error, Result};
use crate::request::{Order, PropertyOrder, Query, RunQueryRequest};
use dsadmin_core::Entity;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Default call budget for one paged fetch
pub const DEFAULT_MAX_CALLS: u32 = 1000;

/// Pager settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagerConfig {
    /// Calls one fetch may issue before failing with [`Error::TooManyCalls`]
    #[serde(default = "default_max_calls")]
    pub max_calls: u32,
}

fn default_max_calls() -> u32 {
    DEFAULT_MAX_CALLS
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            max_calls: DEFAULT_MAX_CALLS,
        }
    }
}

/// One page of one kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Kind to list
    pub kind: String,
    /// Namespace; `None` is the default namespace
    pub namespace: Option<String>,
    /// Optional sort
    pub order: Option<Order>,
    /// Entities per page
    pub page_size: u32,
    /// Zero-based page number
    pub page: u32,
}

impl PageRequest {
    /// First page of `kind` in the default namespace
    pub fn new(kind: impl Into<String>, page_size: u32) -> Self {
        Self {
            kind: kind.into(),
            namespace: None,
            order: None,
            page_size,
            page: 0,
        }
    }

    /// Select the namespace
    pub fn namespace(mut self, namespace: Option<&str>) -> Self {
        self.namespace = namespace.map(str::to_string);
        self
    }

    /// Sort the results
    pub fn order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    /// Select the page number
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }
}

/// Fetches pages through a [`QueryBackend`]
pub struct QueryPager<'b, B: ?Sized> {
    backend: &'b B,
    config: PagerConfig,
}

impl<'b, B: QueryBackend + ?Sized> QueryPager<'b, B> {
    /// Pager with the default call budget
    pub fn new(backend: &'b B) -> Self {
        Self::with_config(backend, PagerConfig::default())
    }

    /// Pager with explicit settings
    pub fn with_config(backend: &'b B, config: PagerConfig) -> Self {
        Self { backend, config }
    }

    /// Fetch one page
    ///
    /// # Errors
    ///
    /// Fails with the backend's error if any call fails, or with
    /// [`Error::TooManyCalls`] if the page is not complete within the call
    /// budget.
    pub async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Entity>> {
        let mut offset = request.page.saturating_mul(request.page_size);
        let mut limit = request.page_size;
        let mut cursor: Option<String> = None;
        let mut entities = Vec::new();
        let mut calls = 0u32;

        while limit > 0 {
            if calls >= self.config.max_calls {
                warn!(
                    target: "dsadmin::query",
                    kind = %request.kind,
                    calls,
                    received = entities.len(),
                    "Paged fetch exhausted its call budget"
                );
                return Err(Error::TooManyCalls { calls });
            }
            calls += 1;

            let query = Query {
                limit: Some(limit),
                offset: Some(offset),
                start_cursor: cursor.take(),
                order: request.order.iter().map(PropertyOrder::from).collect(),
                ..Query::kind(request.kind.clone())
            };
            debug!(target: "dsadmin::query", kind = %request.kind, call = calls, offset, limit, "Running query");

            let response = self
                .backend
                .run_query(&RunQueryRequest::structured(
                    request.namespace.as_deref(),
                    query,
                ))
                .await?;

            let batch = response.batch;
            let received = batch.entity_results.len();
            entities.extend(batch.entity_results.into_iter().map(|r| r.entity));

            if batch.more_results.is_terminal() {
                break;
            }
            offset = offset.saturating_sub(batch.skipped_results);
            limit = limit.saturating_sub(u32::try_from(received).unwrap_or(u32::MAX));
            cursor = batch.end_cursor;
        }

        debug!(target: "dsadmin::query", kind = %request.kind, calls, count = entities.len(), "Paged fetch complete");
        Ok(entities)
    }
}
