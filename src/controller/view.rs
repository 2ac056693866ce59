//! Observable list state

use crate::core::filter::FilterSet;
use crate::core::query::{PaginationState, QueryState, SortSpec};
use crate::core::record::Record;
use serde::Serialize;

/// Everything a list view renders
#[derive(Debug, Clone, Serialize)]
pub struct ListView<R: Record> {
    /// Records of the current page
    pub list: Vec<R>,
    pub pagination: PaginationState,
    pub sort: SortSpec,
    pub filters: FilterSet,
    pub search: String,

    /// Record loaded by `select` or returned by the last mutation
    pub selected: Option<R>,

    /// A page fetch is outstanding
    pub is_loading: bool,

    /// A create, update or delete is outstanding
    pub is_submitting: bool,

    /// Message of the last failure, cleared by the next request
    pub error: Option<String>,
}

impl<R: Record> ListView<R> {
    /// Empty view reflecting a query state
    pub fn new(state: &QueryState) -> Self {
        Self {
            list: Vec::new(),
            pagination: state.pagination.clone(),
            sort: state.sort.clone(),
            filters: state.filters.clone(),
            search: state.search.clone(),
            selected: None,
            is_loading: false,
            is_submitting: false,
            error: None,
        }
    }
}

impl<R: Record> Default for ListView<R> {
    fn default() -> Self {
        Self::new(&QueryState::default())
    }
}

/// What happened to the result of a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The result was written to the view
    Applied,
    /// A newer request was issued meanwhile; the result was discarded
    Stale,
    /// Nothing changed, so no fetch was issued
    Unchanged,
}
