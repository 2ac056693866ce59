//! HTTP handlers for list collections
//!
//! Handlers are generic over the record type and its source, so one set of
//! functions serves every collection.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use crate::core::error::{ListError, ListResult};
use crate::core::filter::{FilterClause, FilterSet};
use crate::core::query::{ListParams, Page};
use crate::core::record::{Record, RecordId};
use crate::core::source::RecordSource;

/// List one page of a collection
///
/// Route: `GET /{collection}?page&per_page&search&sort_by&order&filters`
pub async fn list_records<R, S>(
    State(source): State<Arc<S>>,
    Query(params): Query<ListParams>,
) -> ListResult<Json<Page<R>>>
where
    R: Record,
    S: RecordSource<R> + 'static,
{
    let state = params.into_query_state()?;
    tracing::debug!(
        collection = R::resource_name(),
        page = state.page(),
        search = %state.search,
        filters = state.filters.len(),
        "list request"
    );
    Ok(Json(source.fetch_page(&state).await?))
}

/// List one page of a collection with the filter clauses sent as the body
///
/// Route: `POST /{collection}/query?page&per_page&search&sort_by&order`
pub async fn query_records<R, S>(
    State(source): State<Arc<S>>,
    Query(params): Query<ListParams>,
    Json(clauses): Json<Vec<FilterClause>>,
) -> ListResult<Json<Page<R>>>
where
    R: Record,
    S: RecordSource<R> + 'static,
{
    let mut state = params.into_query_state()?;
    state.filters = FilterSet::from(clauses);
    tracing::debug!(
        collection = R::resource_name(),
        page = state.page(),
        filters = state.filters.len(),
        "query request"
    );
    Ok(Json(source.fetch_page(&state).await?))
}

/// Get a single record
///
/// Route: `GET /{collection}/{id}`
pub async fn get_record<R, S>(
    State(source): State<Arc<S>>,
    Path(id): Path<RecordId>,
) -> ListResult<Json<R>>
where
    R: Record,
    S: RecordSource<R> + 'static,
{
    source
        .fetch_one(id)
        .await?
        .map(Json)
        .ok_or_else(|| ListError::not_found(R::resource_name(), id))
}
