//! Query state, pagination metadata and URL query parameters

use crate::core::error::{ListResult, QueryError};
use crate::core::filter::FilterSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default number of records per page
pub const DEFAULT_PER_PAGE: usize = 10;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// The opposite direction
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// The single active sort key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub sort_by: String,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(sort_by: impl Into<String>, order: SortOrder) -> Self {
        Self {
            sort_by: sort_by.into(),
            order,
        }
    }

    pub fn asc(sort_by: impl Into<String>) -> Self {
        Self::new(sort_by, SortOrder::Asc)
    }

    pub fn desc(sort_by: impl Into<String>) -> Self {
        Self::new(sort_by, SortOrder::Desc)
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::asc("id")
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.sort_by, self.order.as_str())
    }
}

/// Parse `field`, `field:asc` or `field:desc`
impl FromStr for SortSpec {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || QueryError::InvalidSort {
            value: s.to_string(),
        };
        let (field, order) = match s.split_once(':') {
            Some((field, "asc")) => (field, SortOrder::Asc),
            Some((field, "desc")) => (field, SortOrder::Desc),
            Some(_) => return Err(invalid()),
            None => (s, SortOrder::Asc),
        };
        if field.is_empty() {
            return Err(invalid());
        }
        Ok(Self::new(field, order))
    }
}

/// Pagination state and metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    /// Current page number (starts at 1)
    pub current_page: usize,

    /// Number of records per page
    pub per_page: usize,

    /// Total number of records (after search and filters)
    pub total_records: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationState {
    /// Create pagination metadata from a page request and a record count
    ///
    /// Page 0 is read as page 1 and a per-page of 0 as 1.
    pub fn new(current_page: usize, per_page: usize, total_records: usize) -> Self {
        let current_page = current_page.max(1);
        let per_page = per_page.max(1);
        let total_pages = if total_records == 0 {
            0
        } else {
            total_records.div_ceil(per_page)
        };

        Self {
            current_page,
            per_page,
            total_records,
            total_pages,
            has_next: current_page < total_pages,
            has_prev: current_page > 1,
        }
    }

    /// Offset of the first record of the current page
    pub fn offset(&self) -> usize {
        (self.current_page.max(1) - 1).saturating_mul(self.per_page.max(1))
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(1, DEFAULT_PER_PAGE, 0)
    }
}

/// Everything that determines which page of records a list shows
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryState {
    pub search: String,
    pub filters: FilterSet,
    pub sort: SortSpec,
    pub pagination: PaginationState,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a different page size
    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.pagination = PaginationState::new(1, per_page, 0);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_filters(mut self, filters: impl Into<FilterSet>) -> Self {
        self.filters = filters.into();
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.pagination.current_page = page.max(1);
        self
    }

    pub fn page(&self) -> usize {
        self.pagination.current_page.max(1)
    }

    pub fn per_page(&self) -> usize {
        self.pagination.per_page.max(1)
    }
}

/// One page of results, in the shape list endpoints return
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The records of the requested page
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationState,

    /// Sort that produced the ordering
    pub sort: SortSpec,

    /// Filters that were applied
    pub filters: FilterSet,
}

/// URL query parameters of a list request
///
/// # Example
/// ```text
/// GET /documents?page=2&per_page=10
/// GET /documents?search=doe&sort_by=size&order=desc
/// GET /documents?filters=[{"key":"status","op":"eq","value":"Draft"}]
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListParams {
    /// Page number (starts at 1)
    pub page: usize,

    /// Number of records per page
    pub per_page: usize,

    /// Free-text search term
    pub search: Option<String>,

    /// Field to sort by
    pub sort_by: Option<String>,

    /// Sort direction
    pub order: Option<SortOrder>,

    /// Filters as a JSON array of clauses
    pub filters: Option<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            search: None,
            sort_by: None,
            order: None,
            filters: None,
        }
    }
}

impl ListParams {
    /// Parse the `filters` parameter, if present
    pub fn filter_set(&self) -> ListResult<FilterSet> {
        match self.filters.as_deref().map(str::trim) {
            None | Some("") => Ok(FilterSet::new()),
            Some(raw) => Ok(serde_json::from_str(raw)?),
        }
    }

    /// Build the query state these parameters describe
    pub fn into_query_state(self) -> ListResult<QueryState> {
        let filters = self.filter_set()?;
        let sort = SortSpec::new(
            self.sort_by.unwrap_or_else(|| "id".to_string()),
            self.order.unwrap_or_default(),
        );
        Ok(QueryState {
            search: self.search.unwrap_or_default(),
            filters,
            sort,
            pagination: PaginationState::new(self.page, self.per_page, 0),
        })
    }
}
