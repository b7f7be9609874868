//! Paged fetch against a backend that only partially honors offset and limit

#[path = "../common/mod.rs"]
mod common;

use common::{ids, tasks, CappedBackend};
use dsadmin::{Error, Order, PageRequest, PagerConfig, QueryPager};
use std::time::Duration;

fn ids_of(range: std::ops::RangeInclusive<u32>) -> Vec<String> {
    range.map(|id| id.to_string()).collect()
}

#[tokio::test]
async fn second_page_through_capped_backend() {
    let backend = CappedBackend::new(tasks(20), 2, 2);
    let page = QueryPager::new(&backend)
        .fetch_page(&PageRequest::new("Task", 5).page(1))
        .await
        .unwrap();

    assert_eq!(ids(&page), ids_of(6..=10));
    // offset 5 drains as 2 + 2 + 1, then 5 entities arrive 2 + 2 + 1
    assert_eq!(backend.calls(), 5);

    let queries: Vec<_> = backend
        .requests()
        .into_iter()
        .map(|r| r.query.unwrap())
        .collect();
    let progress: Vec<_> = queries.iter().map(|q| (q.offset, q.limit)).collect();
    assert_eq!(
        progress,
        vec![
            (Some(5), Some(5)),
            (Some(3), Some(5)),
            (Some(1), Some(5)),
            (Some(0), Some(3)),
            (Some(0), Some(1)),
        ]
    );
    assert_eq!(queries[0].start_cursor, None);
    assert_eq!(queries[4].start_cursor.as_deref(), Some("9"));
}

#[tokio::test]
async fn first_page_needs_no_skipping() {
    let backend = CappedBackend::new(tasks(20), 2, 2);
    let page = QueryPager::new(&backend)
        .fetch_page(&PageRequest::new("Task", 5))
        .await
        .unwrap();
    assert_eq!(ids(&page), ids_of(1..=5));
    assert_eq!(backend.calls(), 3);
}

#[tokio::test]
async fn uncapped_backend_answers_in_one_call() {
    let backend = CappedBackend::new(tasks(20), usize::MAX, u32::MAX);
    let page = QueryPager::new(&backend)
        .fetch_page(&PageRequest::new("Task", 5).page(3))
        .await
        .unwrap();
    assert_eq!(ids(&page), ids_of(16..=20));
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn short_last_page() {
    let backend = CappedBackend::new(tasks(12), 2, 2);
    let page = QueryPager::new(&backend)
        .fetch_page(&PageRequest::new("Task", 5).page(2))
        .await
        .unwrap();
    assert_eq!(ids(&page), ids_of(11..=12));
}

#[tokio::test]
async fn page_past_the_end_is_empty() {
    let backend = CappedBackend::new(tasks(4), 2, 2);
    let page = QueryPager::new(&backend)
        .fetch_page(&PageRequest::new("Task", 5).page(3))
        .await
        .unwrap();
    assert!(page.is_empty());
}

#[tokio::test]
async fn failed_call_fails_whole_fetch() {
    let backend = CappedBackend::new(tasks(20), 2, 2).failing_on(2);
    let err = QueryPager::new(&backend)
        .fetch_page(&PageRequest::new("Task", 5))
        .await
        .unwrap_err();
    assert!(err.is_status("UNAVAILABLE"));
    assert_eq!(backend.calls(), 2);
}

#[tokio::test]
async fn call_budget_bounds_the_loop() {
    let backend = CappedBackend::new(tasks(100), 1, 1);
    let err = QueryPager::with_config(&backend, PagerConfig { max_calls: 3 })
        .fetch_page(&PageRequest::new("Task", 5).page(4))
        .await
        .unwrap_err();
    assert_eq!(err, Error::TooManyCalls { calls: 3 });
    assert_eq!(backend.calls(), 3);
}

#[tokio::test]
async fn dropping_the_fetch_stops_further_calls() {
    let backend = CappedBackend::new(tasks(20), 2, 2).stalling_on(2);
    let pager = QueryPager::new(&backend);
    let request = PageRequest::new("Task", 5).page(1);

    let outcome = tokio::time::timeout(Duration::from_millis(100), pager.fetch_page(&request)).await;
    assert!(outcome.is_err());

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(backend.calls(), 2);
}

#[tokio::test]
async fn concurrent_fetches_are_independent() {
    let backend = CappedBackend::new(tasks(20), 2, 2);
    let pager = QueryPager::new(&backend);
    let first = PageRequest::new("Task", 5);
    let third = PageRequest::new("Task", 5).page(2);

    let (a, b) = tokio::join!(pager.fetch_page(&first), pager.fetch_page(&third));
    assert_eq!(ids(&a.unwrap()), ids_of(1..=5));
    assert_eq!(ids(&b.unwrap()), ids_of(11..=15));
}

#[tokio::test]
async fn order_and_namespace_sent_on_every_call() {
    let backend = CappedBackend::new(tasks(20), 2, 2);
    let request = PageRequest::new("Task", 4)
        .namespace(Some("prod"))
        .order(Order::descending("title"));
    QueryPager::new(&backend).fetch_page(&request).await.unwrap();

    let requests = backend.requests();
    assert!(requests.len() > 1);
    for sent in requests {
        assert_eq!(sent.partition_id.unwrap().namespace_id, "prod");
        let query = sent.query.unwrap();
        assert_eq!(query.kind[0].name, "Task");
        assert_eq!(query.order.len(), 1);
    }
}
