//! Core module containing fundamental traits and types for list queries

pub mod descriptor;
pub mod error;
pub mod events;
pub mod field;
pub mod filter;
pub mod pipeline;
pub mod query;
pub mod record;
pub mod source;

pub use descriptor::{FieldType, FilterBuilder, FilterFieldDescriptor};
pub use error::{ListError, ListResult};
pub use events::{EventBus, EventEnvelope, RecordEvent};
pub use field::FieldValue;
pub use filter::{FilterClause, FilterSet, Operator, ValueKind};
pub use pipeline::Pipeline;
pub use query::{ListParams, Page, PaginationState, QueryState, SortOrder, SortSpec};
pub use record::{Record, RecordId};
pub use source::{RecordSource, RecordStore};
