//! Record source traits
//!
//! A list controller only talks to a [`RecordSource`]. Whether the pipeline
//! runs locally over an in-memory collection or on the far side of a network
//! call is the source's business; both must honor the same stage semantics.

use crate::core::error::ListResult;
use crate::core::query::{Page, QueryState};
use crate::core::record::{Record, RecordId};
use async_trait::async_trait;
use std::sync::Arc;

/// Supplies pages of records for a query
#[async_trait]
pub trait RecordSource<R: Record>: Send + Sync {
    /// Fetch the page of records `state` describes
    async fn fetch_page(&self, state: &QueryState) -> ListResult<Page<R>>;

    /// Fetch a single record by ID
    async fn fetch_one(&self, id: RecordId) -> ListResult<Option<R>>;
}

/// A record source that also accepts mutations
#[async_trait]
pub trait RecordStore<R: Record>: RecordSource<R> {
    /// Create a record; the store assigns its ID
    async fn create(&self, record: R) -> ListResult<R>;

    /// Replace an existing record
    async fn update(&self, id: RecordId, record: R) -> ListResult<R>;

    /// Delete a record
    async fn delete(&self, id: RecordId) -> ListResult<()>;
}

#[async_trait]
impl<R: Record, S: RecordSource<R> + ?Sized> RecordSource<R> for Arc<S> {
    async fn fetch_page(&self, state: &QueryState) -> ListResult<Page<R>> {
        (**self).fetch_page(state).await
    }

    async fn fetch_one(&self, id: RecordId) -> ListResult<Option<R>> {
        (**self).fetch_one(id).await
    }
}

#[async_trait]
impl<R: Record, S: RecordStore<R> + ?Sized> RecordStore<R> for Arc<S> {
    async fn create(&self, record: R) -> ListResult<R> {
        (**self).create(record).await
    }

    async fn update(&self, id: RecordId, record: R) -> ListResult<R> {
        (**self).update(id, record).await
    }

    async fn delete(&self, id: RecordId) -> ListResult<()> {
        (**self).delete(id).await
    }
}
