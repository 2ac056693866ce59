use crate::controller::view::{FetchOutcome, ListView};
use crate::core::error::{ListError, ListResult};
use crate::core::filter::FilterSet;
use crate::core::query::{QueryState, SortOrder, SortSpec};
use crate::core::record::{Record, RecordId};
use crate::core::source::{RecordSource, RecordStore};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use tokio::sync::watch;

/// Drives one list view over a record source
///
/// Every state change issues exactly one fetch. Each fetch gets a sequence
/// number; a result is only applied if no newer fetch was issued meanwhile,
/// so the view always converges on the latest request.
///
/// ```rust,ignore
/// let store = InMemoryRecordStore::with_records(mock_documents(50));
/// let controller = ListController::new(store);
///
/// controller.set_search("doe").await?;
/// controller.toggle_sort("size").await?;
/// let view = controller.view();
/// ```
pub struct ListController<R: Record, S: RecordSource<R>> {
    source: S,
    query: Mutex<QueryState>,
    latest: AtomicU64,
    view: watch::Sender<ListView<R>>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record, S: RecordSource<R>> ListController<R, S> {
    /// Controller starting from the default query (page 1, 10 per page, by id)
    pub fn new(source: S) -> Self {
        Self::with_state(source, QueryState::default())
    }

    pub fn with_state(source: S, state: QueryState) -> Self {
        let (view, _) = watch::channel(ListView::new(&state));
        Self {
            source,
            query: Mutex::new(state),
            latest: AtomicU64::new(0),
            view,
            _record: PhantomData,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Receive every view change
    pub fn subscribe(&self) -> watch::Receiver<ListView<R>> {
        self.view.subscribe()
    }

    /// Snapshot of the current view
    pub fn view(&self) -> ListView<R> {
        self.view.borrow().clone()
    }

    /// Snapshot of the current query
    pub fn query_state(&self) -> ListResult<QueryState> {
        Ok(self.lock_query()?.clone())
    }

    /// Set the search term and go back to the first page
    pub async fn set_search(&self, term: impl Into<String>) -> ListResult<FetchOutcome> {
        let term = term.into();
        self.change(|query| {
            query.search = term;
            query.pagination.current_page = 1;
            true
        })
        .await
    }

    /// Replace the active sort
    pub async fn set_sort(
        &self,
        field: impl Into<String>,
        order: SortOrder,
    ) -> ListResult<FetchOutcome> {
        let sort = SortSpec::new(field, order);
        self.change(|query| {
            query.sort = sort;
            true
        })
        .await
    }

    /// Flip the order when `field` is already the sort key, otherwise sort
    /// by `field` ascending
    pub async fn toggle_sort(&self, field: impl Into<String>) -> ListResult<FetchOutcome> {
        let field = field.into();
        self.change(|query| {
            query.sort = if query.sort.sort_by == field {
                SortSpec::new(field, query.sort.order.toggled())
            } else {
                SortSpec::asc(field)
            };
            true
        })
        .await
    }

    pub async fn set_filters(&self, filters: impl Into<FilterSet>) -> ListResult<FetchOutcome> {
        let filters = filters.into();
        self.change(|query| {
            query.filters = filters;
            query.pagination.current_page = 1;
            true
        })
        .await
    }

    /// Remove one clause; an index past the end changes nothing
    pub async fn remove_filter_at(&self, index: usize) -> ListResult<FetchOutcome> {
        self.change(|query| {
            if query.filters.remove_at(index).is_none() {
                return false;
            }
            query.pagination.current_page = 1;
            true
        })
        .await
    }

    /// Drop every filter clause and the search term
    pub async fn reset_filters(&self) -> ListResult<FetchOutcome> {
        self.change(|query| {
            query.filters.clear();
            query.search.clear();
            query.pagination.current_page = 1;
            true
        })
        .await
    }

    /// Jump to a page; pages past the end come back empty
    pub async fn set_page(&self, page: usize) -> ListResult<FetchOutcome> {
        self.change(|query| {
            query.pagination.current_page = page.max(1);
            true
        })
        .await
    }

    pub async fn set_per_page(&self, per_page: usize) -> ListResult<FetchOutcome> {
        self.change(|query| {
            query.pagination.per_page = per_page.max(1);
            query.pagination.current_page = 1;
            true
        })
        .await
    }

    /// Fetch the current query again
    pub async fn refresh(&self) -> ListResult<FetchOutcome> {
        self.change(|_| true).await
    }

    /// Load a single record into `selected`
    pub async fn select(&self, id: RecordId) -> ListResult<R> {
        let found = self.source.fetch_one(id).await;
        let result = match found {
            Ok(Some(record)) => Ok(record),
            Ok(None) => Err(ListError::not_found(R::resource_name(), id)),
            Err(err) => Err(err),
        };

        self.view.send_modify(|view| match &result {
            Ok(record) => {
                view.selected = Some(record.clone());
                view.error = None;
            }
            Err(err) => {
                view.selected = None;
                view.error = Some(err.to_string());
            }
        });
        result
    }

    pub fn clear_selected(&self) {
        self.view.send_modify(|view| view.selected = None);
    }

    fn lock_query(&self) -> ListResult<MutexGuard<'_, QueryState>> {
        self.query
            .lock()
            .map_err(|e| ListError::Internal(format!("Failed to acquire query lock: {}", e)))
    }

    /// Apply `edit` to the query and fetch, unless it reports no change
    ///
    /// The sequence number is taken under the query lock, so sequence order
    /// matches the order in which edits were applied.
    async fn change<F>(&self, edit: F) -> ListResult<FetchOutcome>
    where
        F: FnOnce(&mut QueryState) -> bool,
    {
        let (state, seq) = {
            let mut query = self.lock_query()?;
            if !edit(&mut query) {
                return Ok(FetchOutcome::Unchanged);
            }
            let state = query.clone();
            let seq = self.issue(&state);
            (state, seq)
        };
        self.fetch(state, seq).await
    }

    /// Take the next sequence number and show `state` as loading
    fn issue(&self, state: &QueryState) -> u64 {
        let mut seq = 0;
        self.view.send_modify(|view| {
            seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
            view.is_loading = true;
            view.error = None;
            view.search = state.search.clone();
            view.sort = state.sort.clone();
            view.filters = state.filters.clone();
        });
        seq
    }

    async fn fetch(&self, state: QueryState, seq: u64) -> ListResult<FetchOutcome> {
        tracing::debug!(
            collection = R::resource_name(),
            seq,
            page = state.page(),
            "fetch issued"
        );

        let result = self.source.fetch_page(&state).await;

        let mut failure = None;
        let applied = self.view.send_if_modified(|view| {
            if self.latest.load(Ordering::SeqCst) != seq {
                return false;
            }
            view.is_loading = false;
            match result {
                Ok(page) => {
                    view.list = page.data;
                    view.pagination = page.pagination;
                }
                Err(err) => {
                    view.error = Some(err.to_string());
                    failure = Some(err);
                }
            }
            true
        });

        if !applied {
            tracing::warn!(collection = R::resource_name(), seq, "discarding stale fetch result");
            return Ok(FetchOutcome::Stale);
        }
        match failure {
            Some(err) => {
                tracing::warn!(collection = R::resource_name(), seq, error = %err, "fetch failed");
                Err(err)
            }
            None => {
                tracing::debug!(collection = R::resource_name(), seq, "fetch applied");
                Ok(FetchOutcome::Applied)
            }
        }
    }
}

impl<R: Record, S: RecordStore<R>> ListController<R, S> {
    /// Create a record, select it and refresh the page
    pub async fn create(&self, record: R) -> ListResult<R> {
        self.submit(self.source.create(record)).await
    }

    /// Update a record, select it and refresh the page
    pub async fn update(&self, id: RecordId, record: R) -> ListResult<R> {
        self.submit(self.source.update(id, record)).await
    }

    /// Delete a record and refresh the page
    pub async fn delete(&self, id: RecordId) -> ListResult<()> {
        self.begin_submit();
        let result = self.source.delete(id).await;
        self.view.send_modify(|view| {
            view.is_submitting = false;
            match &result {
                Ok(()) => {
                    if view.selected.as_ref().is_some_and(|r| r.id() == id) {
                        view.selected = None;
                    }
                }
                Err(err) => view.error = Some(err.to_string()),
            }
        });
        result?;
        self.resync().await;
        Ok(())
    }

    async fn submit<F>(&self, operation: F) -> ListResult<R>
    where
        F: Future<Output = ListResult<R>>,
    {
        self.begin_submit();
        let result = operation.await;
        self.view.send_modify(|view| {
            view.is_submitting = false;
            match &result {
                Ok(record) => view.selected = Some(record.clone()),
                Err(err) => view.error = Some(err.to_string()),
            }
        });
        let record = result?;
        self.resync().await;
        Ok(record)
    }

    fn begin_submit(&self) {
        self.view.send_modify(|view| {
            view.is_submitting = true;
            view.error = None;
        });
    }

    /// Refresh after a mutation; a failed refresh is already reported in the view
    async fn resync(&self) {
        let _ = self.refresh().await;
    }
}
