//! The list query pipeline: search, filter, sort, paginate
//!
//! [`Pipeline::run`] is a pure function of its inputs. Stages always run in
//! the same order:
//!
//! 1. search: keep records where any search field contains the term,
//!    ignoring case
//! 2. filter: keep records every clause accepts
//! 3. sort: stable sort on the single sort key (ties keep input order)
//! 4. paginate: slice the requested page; a page past the end is empty

use crate::core::field::sort_cmp;
use crate::core::filter::FilterSet;
use crate::core::query::{Page, PaginationState, QueryState, SortOrder, SortSpec};
use crate::core::record::Record;
use std::cmp::Ordering;

/// Search configuration plus the stage functions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    search_fields: Vec<String>,
}

impl Pipeline {
    /// Pipeline searching an explicit list of fields
    pub fn new<I, S>(search_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            search_fields: search_fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Pipeline searching the record type's default search fields
    pub fn for_record<R: Record>() -> Self {
        Self::new(R::search_fields().iter().copied())
    }

    pub fn search_fields(&self) -> &[String] {
        &self.search_fields
    }

    /// Run every stage and return the requested page
    pub fn run<'a, R: Record>(
        &self,
        records: impl IntoIterator<Item = &'a R>,
        state: &QueryState,
    ) -> Page<R> {
        let searched = self.search(records, &state.search);
        let mut selected = filter(&searched, &state.filters);
        sort(&mut selected, &state.sort);
        let (data, pagination) = paginate(&selected, state.page(), state.per_page());

        Page {
            data: data.into_iter().cloned().collect(),
            pagination,
            sort: state.sort.clone(),
            filters: state.filters.clone(),
        }
    }

    /// Search stage on its own
    pub fn search<'a, R: Record>(
        &self,
        records: impl IntoIterator<Item = &'a R>,
        term: &str,
    ) -> Vec<&'a R> {
        records
            .into_iter()
            .filter(|r| self.matches_search(*r, term))
            .collect()
    }

    /// Whether a record matches the search term (an empty term matches all)
    pub fn matches_search<R: Record>(&self, record: &R, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let needle = term.to_lowercase();
        self.search_fields.iter().any(|field| {
            record
                .field_value(field)
                .is_some_and(|v| v.to_text().to_lowercase().contains(&needle))
        })
    }
}

/// Run the pipeline with the record type's default search fields
pub fn run<'a, R: Record>(
    records: impl IntoIterator<Item = &'a R>,
    state: &QueryState,
) -> Page<R> {
    Pipeline::for_record::<R>().run(records, state)
}

/// Filter stage on its own
pub fn filter<'a, R: Record>(records: &[&'a R], filters: &FilterSet) -> Vec<&'a R> {
    records
        .iter()
        .copied()
        .filter(|r| filters.matches(*r))
        .collect()
}

/// Stable sort on a single key
pub fn sort<R: Record>(records: &mut [&R], spec: &SortSpec) {
    records.sort_by(|a, b| compare_by(*a, *b, spec));
}

fn compare_by<R: Record>(a: &R, b: &R, spec: &SortSpec) -> Ordering {
    let ord = sort_cmp(
        a.field_value(&spec.sort_by).as_ref(),
        b.field_value(&spec.sort_by).as_ref(),
    );
    match spec.order {
        SortOrder::Asc => ord,
        SortOrder::Desc => ord.reverse(),
    }
}

/// Slice one page out of an already sorted list
///
/// Never fails: a page past the end yields an empty slice.
pub fn paginate<T: Clone>(
    items: &[T],
    page: usize,
    per_page: usize,
) -> (Vec<T>, PaginationState) {
    let pagination = PaginationState::new(page, per_page, items.len());
    let start = pagination.offset().min(items.len());
    let end = start.saturating_add(pagination.per_page).min(items.len());
    (items[start..end].to_vec(), pagination)
}
