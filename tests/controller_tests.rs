//! Integration tests for the list controller
//!
//! Covers UI intents against a shared in-memory store, last-request-wins
//! resolution of overlapping fetches, and failure reporting.

use async_trait::async_trait;
use listview::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

// =============================================================================
// Test Sources
// =============================================================================

/// Answers after a delay chosen by the search term: "slow" takes 300 ms,
/// anything else 10 ms
struct ScriptedSource {
    records: Vec<Document>,
}

impl ScriptedSource {
    fn new() -> Self {
        Self {
            records: mock_documents(50),
        }
    }
}

#[async_trait]
impl RecordSource<Document> for ScriptedSource {
    async fn fetch_page(&self, state: &QueryState) -> ListResult<Page<Document>> {
        let delay = if state.search == "slow" { 300 } else { 10 };
        tokio::time::sleep(Duration::from_millis(delay)).await;

        // "slow" and "fast" match nothing; strip them so pages are comparable
        let query = state.clone().with_search("");
        Ok(Pipeline::for_record::<Document>().run(&self.records, &query))
    }

    async fn fetch_one(&self, id: RecordId) -> ListResult<Option<Document>> {
        Ok(self.records.iter().find(|d| d.id == id).cloned())
    }
}

/// Fails every fetch while `failing` is set
struct FlakySource {
    inner: InMemoryRecordStore<Document>,
    failing: AtomicBool,
}

#[async_trait]
impl RecordSource<Document> for FlakySource {
    async fn fetch_page(&self, state: &QueryState) -> ListResult<Page<Document>> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ListError::fetch_failed("documents", "connection reset"));
        }
        self.inner.fetch_page(state).await
    }

    async fn fetch_one(&self, id: RecordId) -> ListResult<Option<Document>> {
        self.inner.fetch_one(id).await
    }
}

fn controller() -> ListController<Document, InMemoryRecordStore<Document>> {
    ListController::new(InMemoryRecordStore::with_records(mock_documents(50)))
}

// =============================================================================
// Intents
// =============================================================================

#[tokio::test]
async fn test_refresh_loads_first_page() {
    let controller = controller();
    assert_eq!(controller.refresh().await.unwrap(), FetchOutcome::Applied);

    let view = controller.view();
    assert_eq!(view.list.len(), 10);
    assert_eq!(view.list[0].id, 1);
    assert_eq!(view.pagination.total_records, 50);
    assert_eq!(view.pagination.total_pages, 5);
    assert!(!view.is_loading);
    assert!(view.error.is_none());
}

#[tokio::test]
async fn test_toggle_sort_cycles_direction() {
    let controller = controller();

    controller.toggle_sort("size").await.unwrap();
    assert_eq!(controller.view().sort, SortSpec::asc("size"));

    controller.toggle_sort("size").await.unwrap();
    assert_eq!(controller.view().sort, SortSpec::desc("size"));

    controller.toggle_sort("size").await.unwrap();
    assert_eq!(controller.view().sort, SortSpec::asc("size"));

    controller.toggle_sort("title").await.unwrap();
    assert_eq!(controller.view().sort, SortSpec::asc("title"));

    // Default sort is id ascending, so the first toggle on id flips it
    let fresh = self::controller();
    fresh.toggle_sort("id").await.unwrap();
    let view = fresh.view();
    assert_eq!(view.sort, SortSpec::desc("id"));
    assert_eq!(view.list[0].id, 50);
}

#[tokio::test]
async fn test_set_sort_replaces_without_toggling() {
    let controller = controller();
    controller.set_sort("size", SortOrder::Desc).await.unwrap();
    controller.set_sort("size", SortOrder::Desc).await.unwrap();

    let view = controller.view();
    assert_eq!(view.sort, SortSpec::desc("size"));
    assert!(view.list.windows(2).all(|w| w[0].size >= w[1].size));
}

#[tokio::test]
async fn test_search_resets_page() {
    let controller = controller();
    controller.set_page(3).await.unwrap();
    assert_eq!(controller.view().pagination.current_page, 3);

    controller.set_search("doe").await.unwrap();
    let view = controller.view();
    assert_eq!(view.pagination.current_page, 1);
    assert_eq!(view.pagination.total_records, 13);
    assert_eq!(view.search, "doe");
}

#[tokio::test]
async fn test_filters_reset_page_and_remove() {
    let controller = controller();
    controller.set_page(2).await.unwrap();

    controller
        .set_filters(vec![
            FilterClause::new("status", Operator::Eq, "Draft"),
            FilterClause::new("type", Operator::Eq, "PDF"),
        ])
        .await
        .unwrap();
    let view = controller.view();
    assert_eq!(view.pagination.current_page, 1);
    assert_eq!(view.pagination.total_records, 3);

    controller.set_page(2).await.unwrap();
    assert_eq!(
        controller.remove_filter_at(1).await.unwrap(),
        FetchOutcome::Applied
    );
    let view = controller.view();
    assert_eq!(view.filters.len(), 1);
    assert_eq!(view.pagination.current_page, 1);
    assert_eq!(view.pagination.total_records, 13);
}

#[tokio::test]
async fn test_remove_filter_out_of_range_is_unchanged() {
    let controller = controller();
    controller
        .set_filters(vec![FilterClause::new("status", Operator::Eq, "Draft")])
        .await
        .unwrap();
    controller.set_page(2).await.unwrap();

    assert_eq!(
        controller.remove_filter_at(5).await.unwrap(),
        FetchOutcome::Unchanged
    );
    let query = controller.query_state().unwrap();
    assert_eq!(query.filters.len(), 1);
    assert_eq!(query.page(), 2);
}

#[tokio::test]
async fn test_reset_filters_clears_search_too() {
    let controller = controller();
    controller.set_search("doe").await.unwrap();
    controller
        .set_filters(vec![FilterClause::new("type", Operator::Eq, "PDF")])
        .await
        .unwrap();
    controller.set_page(2).await.unwrap();

    controller.reset_filters().await.unwrap();
    let view = controller.view();
    assert!(view.filters.is_empty());
    assert!(view.search.is_empty());

    let untouched = self::controller();
    untouched.refresh().await.unwrap();
    let fresh = untouched.view();
    assert_eq!(view.list, fresh.list);
    assert_eq!(view.pagination, fresh.pagination);
    assert_eq!(view.sort, fresh.sort);
}

#[tokio::test]
async fn test_page_changes() {
    let controller = controller();

    controller.set_page(99).await.unwrap();
    let view = controller.view();
    assert!(view.list.is_empty());
    assert_eq!(view.pagination.current_page, 99);

    controller.set_page(0).await.unwrap();
    assert_eq!(controller.view().pagination.current_page, 1);

    controller.set_page(4).await.unwrap();
    controller.set_per_page(25).await.unwrap();
    let view = controller.view();
    assert_eq!(view.pagination.current_page, 1);
    assert_eq!(view.pagination.per_page, 25);
    assert_eq!(view.pagination.total_pages, 2);
    assert_eq!(view.list.len(), 25);
}

#[tokio::test]
async fn test_initial_state_from_config() {
    let config = ListConfig::default_config();
    let documents = config.collection("documents").unwrap();
    let store = InMemoryRecordStore::with_records(mock_documents(50))
        .with_pipeline(documents.pipeline());
    let controller: ListController<Document, _> =
        ListController::with_state(store, documents.initial_state());

    controller.set_search("jane").await.unwrap();
    assert_eq!(controller.view().pagination.total_records, 13);
}

#[tokio::test]
async fn test_subscribers_see_changes() {
    let controller = controller();
    let mut rx = controller.subscribe();
    rx.mark_unchanged();

    controller.set_search("smith").await.unwrap();
    assert!(rx.has_changed().unwrap());
    let view = rx.borrow_and_update().clone();
    assert_eq!(view.search, "smith");
    assert!(view.list.iter().all(|d| d.created_by == "Jane Smith"));
}

// =============================================================================
// Overlapping requests
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_stale_result_is_discarded() {
    let controller: ListController<Document, _> = ListController::new(ScriptedSource::new());
    controller.set_per_page(5).await.unwrap();

    let (slow, fast) = futures::join!(
        async {
            controller.set_page(2).await.unwrap();
            controller.set_search("slow").await
        },
        async {
            // issued after the slow request, resolves first
            tokio::time::sleep(Duration::from_millis(50)).await;
            controller.set_search("fast").await
        }
    );

    assert_eq!(fast.unwrap(), FetchOutcome::Applied);
    assert_eq!(slow.unwrap(), FetchOutcome::Stale);

    let view = controller.view();
    assert_eq!(view.search, "fast");
    assert!(!view.is_loading);
    assert_eq!(view.pagination.current_page, 1);
    assert_eq!(view.list.iter().map(|d| d.id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
}

#[tokio::test(start_paused = true)]
async fn test_latest_request_wins_even_when_slowest() {
    let controller: ListController<Document, _> = ListController::new(ScriptedSource::new());

    let (first, second) = futures::join!(controller.set_page(3), async {
        tokio::time::sleep(Duration::from_millis(1)).await;
        controller.set_search("slow").await
    });

    assert_eq!(first.unwrap(), FetchOutcome::Stale);
    assert_eq!(second.unwrap(), FetchOutcome::Applied);
    let view = controller.view();
    assert_eq!(view.search, "slow");
    assert_eq!(view.pagination.current_page, 1);
    assert_eq!(view.list[0].id, 1);
}

#[tokio::test(start_paused = true)]
async fn test_loading_flag_tracks_latest_request() {
    let store = InMemoryRecordStore::with_records(mock_documents(50))
        .with_latency(Latency::mock_backend());
    let controller: ListController<Document, _> = ListController::new(store);

    let (outcome, seen_loading) = futures::join!(controller.refresh(), async {
        controller.view().is_loading
    });

    assert!(seen_loading);
    assert_eq!(outcome.unwrap(), FetchOutcome::Applied);
    assert!(!controller.view().is_loading);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_view_converges_on_query_state_across_threads() {
    let controller = Arc::new(controller());

    for round in 0..50 {
        let searcher = Arc::clone(&controller);
        let pager = Arc::clone(&controller);
        let term = if round % 2 == 0 { "doe" } else { "smith" };

        let search = tokio::spawn(async move { searcher.set_search(term).await });
        let page = tokio::spawn(async move { pager.set_page(2).await });
        search.await.unwrap().unwrap();
        page.await.unwrap().unwrap();

        let query = controller.query_state().unwrap();
        let view = controller.view();
        assert_eq!(view.search, query.search, "round {}", round);
        assert_eq!(view.pagination.current_page, query.page(), "round {}", round);
        assert!(!view.is_loading);
    }
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_fetch_failure_keeps_list() {
    let source = FlakySource {
        inner: InMemoryRecordStore::with_records(mock_documents(50)),
        failing: AtomicBool::new(false),
    };
    let controller: ListController<Document, _> = ListController::new(source);
    controller.refresh().await.unwrap();

    controller.source().failing.store(true, Ordering::SeqCst);
    let err = controller.set_page(2).await.unwrap_err();
    assert_eq!(err.error_code(), "FETCH_FAILED");

    let view = controller.view();
    assert!(!view.is_loading);
    assert!(view.error.as_deref().unwrap().contains("connection reset"));
    assert_eq!(view.list[0].id, 1);

    controller.source().failing.store(false, Ordering::SeqCst);
    controller.refresh().await.unwrap();
    let view = controller.view();
    assert!(view.error.is_none());
    assert_eq!(view.list[0].id, 11);
}

#[tokio::test]
async fn test_select_and_clear() {
    let controller = controller();

    let doc = controller.select(7).await.unwrap();
    assert_eq!(doc.id, 7);
    assert_eq!(controller.view().selected.unwrap().id, 7);

    let err = controller.select(999).await.unwrap_err();
    assert_eq!(err.error_code(), "RECORD_NOT_FOUND");
    let view = controller.view();
    assert!(view.selected.is_none());
    assert!(view.error.is_some());

    controller.select(3).await.unwrap();
    controller.clear_selected();
    assert!(controller.view().selected.is_none());
}

// =============================================================================
// Mutations
// =============================================================================

#[tokio::test]
async fn test_create_selects_and_refreshes() {
    let controller = controller();
    controller.set_sort("id", SortOrder::Desc).await.unwrap();

    let mut draft = mock_documents(1).remove(0);
    draft.title = "Quarterly report".to_string();
    let created = controller.create(draft).await.unwrap();
    assert_eq!(created.id, 51);

    let view = controller.view();
    assert!(!view.is_submitting);
    assert_eq!(view.selected.as_ref().unwrap().id, 51);
    assert_eq!(view.pagination.total_records, 51);
    assert_eq!(view.list[0].title, "Quarterly report");
}

#[tokio::test]
async fn test_update_and_delete() {
    let controller = controller();
    controller.refresh().await.unwrap();

    let mut doc = controller.select(2).await.unwrap();
    doc.status = "Published".to_string();
    let updated = controller.update(2, doc).await.unwrap();
    assert_eq!(updated.status, "Published");
    assert!(updated.updated_at > mock_documents(2)[1].updated_at);
    assert_eq!(controller.view().list[1].status, "Published");

    controller.delete(2).await.unwrap();
    let view = controller.view();
    assert!(view.selected.is_none());
    assert_eq!(view.pagination.total_records, 49);
    assert_eq!(view.list[1].id, 3);

    let err = controller.delete(2).await.unwrap_err();
    assert_eq!(err.error_code(), "RECORD_NOT_FOUND");
    let view = controller.view();
    assert!(!view.is_submitting);
    assert!(view.error.is_some());
}
