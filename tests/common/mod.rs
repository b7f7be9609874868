//! Shared test utilities for all integration test suites.
//!
//! Include with `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]

use async_trait::async_trait;
use dsadmin::crates::query::request::{
    EntityResult, MoreResults, QueryResultBatch, RunQueryRequest, RunQueryResponse,
};
use dsadmin::{
    Entity, Error, Key, PartitionId, Properties, PropertyValue, QueryBackend, Result, Value,
};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

// ============================================================================
// Data builders
// ============================================================================

pub const PROJECT: &str = "test-project";

pub fn partition(namespace: Option<&str>) -> PartitionId {
    PartitionId::new(PROJECT, namespace)
}

pub fn task(id: u32) -> Entity {
    let mut properties = Properties::new();
    properties.insert(
        "title".to_string(),
        PropertyValue::new(Value::String(format!("task {}", id))),
    );
    Entity::new(Key::with_id(partition(None), "Task", id), properties)
}

pub fn tasks(count: u32) -> Vec<Entity> {
    (1..=count).map(task).collect()
}

pub fn ids(entities: &[Entity]) -> Vec<String> {
    entities
        .iter()
        .filter_map(|e| e.key.display_id())
        .collect()
}

// ============================================================================
// Simulated backend
// ============================================================================

/// In-memory `runQuery` that honors only part of each request
///
/// Per call it skips at most `max_skip` of the requested offset and returns
/// at most `max_results` entities. While the offset is not fully consumed it
/// returns no entities. Cursors are positions into the data set. Any batch
/// that leaves data unread reports `NOT_FINISHED`.
pub struct CappedBackend {
    data: Vec<Entity>,
    max_results: usize,
    max_skip: u32,
    fail_on_call: Option<u32>,
    stall_on_call: Option<u32>,
    calls: AtomicU32,
    requests: Mutex<Vec<RunQueryRequest>>,
}

impl CappedBackend {
    pub fn new(data: Vec<Entity>, max_results: usize, max_skip: u32) -> Self {
        Self {
            data,
            max_results,
            max_skip,
            fail_on_call: None,
            stall_on_call: None,
            calls: AtomicU32::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fail the n-th call (1-based)
    pub fn failing_on(mut self, call: u32) -> Self {
        self.fail_on_call = Some(call);
        self
    }

    /// Never answer the n-th call (1-based)
    pub fn stalling_on(mut self, call: u32) -> Self {
        self.stall_on_call = Some(call);
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RunQueryRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryBackend for CappedBackend {
    async fn run_query(&self, request: &RunQueryRequest) -> Result<RunQueryResponse> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.requests.lock().unwrap().push(request.clone());

        if self.stall_on_call == Some(call) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        if self.fail_on_call == Some(call) {
            return Err(Error::Api {
                code: 503,
                status: "UNAVAILABLE".into(),
                message: "backend unavailable".into(),
            });
        }

        let query = request
            .query
            .as_ref()
            .ok_or_else(|| Error::invalid_input("structured query expected"))?;
        let start: usize = match &query.start_cursor {
            Some(cursor) => cursor.parse().map_err(|_| Error::invalid_input("bad cursor"))?,
            None => 0,
        };
        let offset = query.offset.unwrap_or(0);
        let limit = query.limit.map(|l| l as usize).unwrap_or(usize::MAX);

        let remaining = self.data.len().saturating_sub(start);
        let skipped = offset.min(self.max_skip).min(remaining as u32);
        let mut position = start + skipped as usize;

        let mut entity_results = Vec::new();
        if skipped == offset {
            let take = limit.min(self.max_results).min(self.data.len() - position);
            entity_results = self.data[position..position + take]
                .iter()
                .cloned()
                .map(|entity| EntityResult { entity })
                .collect();
            position += take;
        }

        let more_results = if position >= self.data.len() {
            MoreResults::NoMoreResults
        } else {
            MoreResults::NotFinished
        };

        Ok(RunQueryResponse {
            batch: QueryResultBatch {
                entity_results,
                more_results,
                skipped_results: skipped,
                end_cursor: Some(position.to_string()),
            },
        })
    }
}
