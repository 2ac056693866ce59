//! Record trait: the opaque, field-addressable view the pipeline works on

use crate::core::field::FieldValue;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Unique identifier of a record within its collection
pub type RecordId = u64;

/// A record that can be searched, filtered, sorted and paginated.
///
/// Records are addressed by field name. Fields a record does not have are
/// reported as `None` and treated as absent by every pipeline stage.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection name used in routes and logs (e.g., "users", "documents")
    fn resource_name() -> &'static str;

    /// Text fields scanned by free-text search, OR-combined
    fn search_fields() -> &'static [&'static str];

    /// Get the unique identifier for this record
    fn id(&self) -> RecordId;

    /// Replace the identifier (used when a store assigns one on create)
    fn set_id(&mut self, id: RecordId);

    /// Get the value of a specific field by name
    ///
    /// Implementations must answer `"id"` with the identifier.
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Refresh modification timestamps, if the record keeps any
    fn touch(&mut self, _now: DateTime<Utc>) {}
}
