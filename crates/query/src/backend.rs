//! Remote API seams
//!
//! [`QueryBackend`] is all the pager needs. [`DatastoreBackend`] adds the
//! read-by-key and write methods used by the admin client. The HTTP
//! implementation lives in [`crate::http`]; tests substitute in-memory fakes.

use crate::error::Result;
use crate::request::{
    CommitRequest, CommitResponse, ExportRequest, ImportRequest, LookupRequest, LookupResponse,
    Operation, RunQueryRequest, RunQueryResponse,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Executes `runQuery`
#[async_trait]
pub trait QueryBackend: Send + Sync {
    /// Run one query call and return its result batch
    async fn run_query(&self, request: &RunQueryRequest) -> Result<RunQueryResponse>;
}

/// Full datastore API
#[async_trait]
pub trait DatastoreBackend: QueryBackend {
    /// Fetch entities by key
    async fn lookup(&self, request: &LookupRequest) -> Result<LookupResponse>;

    /// Apply mutations
    async fn commit(&self, request: &CommitRequest) -> Result<CommitResponse>;

    /// Start loading an export into the project
    async fn import(&self, request: &ImportRequest) -> Result<Operation>;

    /// Start exporting the project's entities
    async fn export(&self, request: &ExportRequest) -> Result<Operation>;
}

#[async_trait]
impl<B: QueryBackend + ?Sized> QueryBackend for Arc<B> {
    async fn run_query(&self, request: &RunQueryRequest) -> Result<RunQueryResponse> {
        (**self).run_query(request).await
    }
}

#[async_trait]
impl<B: DatastoreBackend + ?Sized> DatastoreBackend for Arc<B> {
    async fn lookup(&self, request: &LookupRequest) -> Result<LookupResponse> {
        (**self).lookup(request).await
    }

    async fn commit(&self, request: &CommitRequest) -> Result<CommitResponse> {
        (**self).commit(request).await
    }

    async fn import(&self, request: &ImportRequest) -> Result<Operation> {
        (**self).import(request).await
    }

    async fn export(&self, request: &ExportRequest) -> Result<Operation> {
        (**self).export(request).await
    }
}
