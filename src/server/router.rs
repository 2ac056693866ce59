//! Router builder utilities for collection routes

use super::handlers::{get_record, list_records, query_records};
use crate::core::record::Record;
use crate::core::source::RecordSource;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

/// Build the routes of one collection, mounted at `/{resource_name}`
///
/// - GET /{collection} - List a page (filters as a JSON query parameter)
/// - POST /{collection}/query - List a page (filters as the JSON body)
/// - GET /{collection}/{id} - Get a single record
pub fn collection_router<R, S>(source: S) -> Router
where
    R: Record,
    S: RecordSource<R> + 'static,
{
    let base = format!("/{}", R::resource_name());
    Router::new()
        .route(&base, get(list_records::<R, S>))
        .route(&format!("{}/query", base), post(query_records::<R, S>))
        .route(&format!("{}/{{id}}", base), get(get_record::<R, S>))
        .with_state(Arc::new(source))
}
