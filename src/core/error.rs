//! Typed error handling for list views
//!
//! Every failure a list view can observe is a [`ListError`]. None of them is
//! fatal: callers recover by re-invoking the operation that failed.
//!
//! # Error Categories
//!
//! - [`RecordError`]: a single record lookup or mutation failed
//! - [`QueryError`]: a filter, sort or page request could not be understood
//! - [`SourceError`]: the record source could not answer a fetch
//! - [`ConfigError`]: configuration parsing and validation
//!
//! # Example
//!
//! ```rust,ignore
//! match controller.select(42).await {
//!     Ok(_) => {}
//!     Err(ListError::Record(RecordError::NotFound { id, .. })) => {
//!         println!("record {} is gone", id);
//!     }
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use crate::core::record::RecordId;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type for list views
#[derive(Debug)]
pub enum ListError {
    /// Record lookups and mutations
    Record(RecordError),

    /// Malformed query input (filters, sort, paging)
    Query(QueryError),

    /// Record source failures
    Source(SourceError),

    /// Configuration errors
    Config(ConfigError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::Record(e) => write!(f, "{}", e),
            ListError::Query(e) => write!(f, "{}", e),
            ListError::Source(e) => write!(f, "{}", e),
            ListError::Config(e) => write!(f, "{}", e),
            ListError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ListError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ListError::Record(e) => Some(e),
            ListError::Query(e) => Some(e),
            ListError::Source(e) => Some(e),
            ListError::Config(e) => Some(e),
            ListError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ListError {
    /// Shorthand for a missing record
    pub fn not_found(collection: impl Into<String>, id: RecordId) -> Self {
        ListError::Record(RecordError::NotFound {
            collection: collection.into(),
            id,
        })
    }

    /// Shorthand for a failed fetch
    pub fn fetch_failed(collection: impl Into<String>, message: impl Into<String>) -> Self {
        ListError::Source(SourceError::FetchFailed {
            collection: collection.into(),
            message: message.into(),
        })
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ListError::Record(e) => e.status_code(),
            ListError::Query(_) => StatusCode::BAD_REQUEST,
            ListError::Source(e) => e.status_code(),
            ListError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ListError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ListError::Record(e) => e.error_code(),
            ListError::Query(e) => e.error_code(),
            ListError::Source(e) => e.error_code(),
            ListError::Config(_) => "CONFIG_ERROR",
            ListError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ListError::Record(RecordError::NotFound { collection, id }) => {
                Some(serde_json::json!({
                    "collection": collection,
                    "id": id
                }))
            }
            ListError::Query(QueryError::InvalidClause { key, .. }) => {
                Some(serde_json::json!({ "key": key }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for ListError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Record Errors
// =============================================================================

/// Errors related to single-record operations
#[derive(Debug)]
pub enum RecordError {
    /// Record was not found
    NotFound { collection: String, id: RecordId },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::NotFound { collection, id } => {
                write!(f, "{} record with id '{}' not found", collection, id)
            }
        }
    }
}

impl std::error::Error for RecordError {}

impl RecordError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RecordError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RecordError::NotFound { .. } => "RECORD_NOT_FOUND",
        }
    }
}

impl From<RecordError> for ListError {
    fn from(err: RecordError) -> Self {
        ListError::Record(err)
    }
}

// =============================================================================
// Query Errors
// =============================================================================

/// Errors related to query input
#[derive(Debug)]
pub enum QueryError {
    /// The filters parameter is not a JSON array of clauses
    InvalidFilters { message: String },

    /// A clause was rejected by a filter builder
    InvalidClause { key: String, message: String },

    /// A sort expression could not be parsed
    InvalidSort { value: String },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::InvalidFilters { message } => write!(f, "Invalid filters: {}", message),
            QueryError::InvalidClause { key, message } => {
                write!(f, "Invalid filter on '{}': {}", key, message)
            }
            QueryError::InvalidSort { value } => write!(f, "Invalid sort expression: '{}'", value),
        }
    }
}

impl std::error::Error for QueryError {}

impl QueryError {
    pub fn error_code(&self) -> &'static str {
        match self {
            QueryError::InvalidFilters { .. } => "INVALID_QUERY",
            QueryError::InvalidClause { .. } => "INVALID_CLAUSE",
            QueryError::InvalidSort { .. } => "INVALID_SORT",
        }
    }
}

impl From<QueryError> for ListError {
    fn from(err: QueryError) -> Self {
        ListError::Query(err)
    }
}

// =============================================================================
// Source Errors
// =============================================================================

/// Errors raised by record sources
#[derive(Debug)]
pub enum SourceError {
    /// The source rejected or could not complete a fetch
    FetchFailed { collection: String, message: String },

    /// The source's storage could not be accessed
    Unavailable { message: String },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::FetchFailed {
                collection,
                message,
            } => write!(f, "Failed to fetch {}: {}", collection, message),
            SourceError::Unavailable { message } => {
                write!(f, "Record source unavailable: {}", message)
            }
        }
    }
}

impl std::error::Error for SourceError {}

impl SourceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SourceError::FetchFailed { .. } => StatusCode::BAD_GATEWAY,
            SourceError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            SourceError::FetchFailed { .. } => "FETCH_FAILED",
            SourceError::Unavailable { .. } => "SOURCE_UNAVAILABLE",
        }
    }
}

impl From<SourceError> for ListError {
    fn from(err: SourceError) -> Self {
        ListError::Source(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config: {message}")]
    ParseError { message: String },

    /// Invalid value in configuration
    #[error("Invalid value for '{field}' in collection '{collection}': {message}")]
    InvalidValue {
        collection: String,
        field: String,
        message: String,
    },

    /// Two collections share a name
    #[error("Collection '{name}' is defined more than once")]
    DuplicateCollection { name: String },

    /// Requested collection is not configured
    #[error("Unknown collection: {name}")]
    UnknownCollection { name: String },
}

impl From<ConfigError> for ListError {
    fn from(err: ConfigError) -> Self {
        ListError::Config(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for ListError {
    fn from(err: serde_json::Error) -> Self {
        ListError::Query(QueryError::InvalidFilters {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for ListError {
    fn from(err: serde_yaml::Error) -> Self {
        ListError::Config(ConfigError::ParseError {
            message: err.to_string(),
        })
    }
}

/// Convert from anyhow::Error for callers that mix error styles
impl From<anyhow::Error> for ListError {
    fn from(err: anyhow::Error) -> Self {
        let err = match err.downcast::<ConfigError>() {
            Ok(config) => return ListError::Config(config),
            Err(err) => err,
        };
        match err.downcast::<serde_yaml::Error>() {
            Ok(yaml) => yaml.into(),
            Err(err) => ListError::Internal(err.to_string()),
        }
    }
}

/// A specialized Result type for list operations
pub type ListResult<T> = Result<T, ListError>;
