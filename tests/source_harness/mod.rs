//! Shared test harness for record source testing
//!
//! Provides a `record_source_tests!` macro validating that a
//! `RecordSource<Document>` seeded with `mock_documents(50)` honors the list
//! pipeline semantics, plus a wire-style source that moves every query
//! through JSON the way a remote backend would receive it.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod source_harness;
//! use source_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod record_source_tests;

use async_trait::async_trait;
use listview::prelude::*;

/// Number of records every harness source is seeded with
pub const SEEDED: usize = 50;

/// Seeded local store
pub fn seeded_store() -> InMemoryRecordStore<Document> {
    InMemoryRecordStore::with_records(mock_documents(SEEDED))
}

/// A source that serializes each query to JSON before running it, the way a
/// server on the far side of an HTTP call would see it
pub struct WireSource {
    records: Vec<Document>,
}

impl WireSource {
    pub fn seeded() -> Self {
        Self {
            records: mock_documents(SEEDED),
        }
    }
}

#[async_trait]
impl RecordSource<Document> for WireSource {
    async fn fetch_page(&self, state: &QueryState) -> ListResult<Page<Document>> {
        let request = serde_json::to_string(state)?;
        let received: QueryState = serde_json::from_str(&request)?;
        let page = Pipeline::for_record::<Document>().run(&self.records, &received);

        let response = serde_json::to_string(&page)?;
        Ok(serde_json::from_str(&response)?)
    }

    async fn fetch_one(&self, id: RecordId) -> ListResult<Option<Document>> {
        Ok(self.records.iter().find(|d| d.id == id).cloned())
    }
}

/// Query for one page with explicit filters
pub fn filtered(clauses: Vec<FilterClause>) -> QueryState {
    QueryState::default().with_filters(clauses)
}

pub fn ids(page: &Page<Document>) -> Vec<RecordId> {
    page.data.iter().map(|d| d.id).collect()
}
