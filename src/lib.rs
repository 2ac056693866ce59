//! # listview
//!
//! Searchable, filterable, sortable and paginated list views over record
//! collections.
//!
//! ## Features
//!
//! - **Query Pipeline**: search, AND-filter, stable sort and paginate, always in that order
//! - **Filter Builder**: closed operator compatibility per field type
//! - **List Controller**: UI intents in, observable view state out, last request wins
//! - **Pluggable Sources**: local in-memory stores and remote sources behind one trait
//! - **Configuration-Based**: describe collections via YAML configuration
//! - **HTTP Exposure**: axum routes for every collection
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use listview::prelude::*;
//!
//! let store = InMemoryRecordStore::with_records(mock_documents(50));
//! let controller = ListController::new(store);
//!
//! controller
//!     .set_filters(vec![FilterClause::new("status", Operator::Eq, "Draft")])
//!     .await?;
//! controller.toggle_sort("size").await?;
//!
//! let view = controller.view();
//! assert!(view.list.iter().all(|doc| doc.status == "Draft"));
//! ```

pub mod config;
pub mod controller;
pub mod core;
#[macro_use]
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        record::{Record, RecordId},
        source::{RecordSource, RecordStore},
    };

    // === Query Types ===
    pub use crate::core::{
        descriptor::{FieldType, FilterBuilder, FilterFieldDescriptor},
        field::FieldValue,
        filter::{FilterClause, FilterSet, Operator},
        pipeline::Pipeline,
        query::{ListParams, Page, PaginationState, QueryState, SortOrder, SortSpec},
    };

    // === Errors ===
    pub use crate::core::error::{ConfigError, ListError, ListResult, QueryError, SourceError};

    // === Events ===
    pub use crate::core::events::{EventBus, EventEnvelope, RecordEvent};

    // === Macros ===
    pub use crate::impl_record;

    // === Controller ===
    pub use crate::controller::{FetchOutcome, ListController, ListView};

    // === Entities ===
    pub use crate::entities::mock::{mock_documents, mock_users};
    pub use crate::entities::{Document, User};

    // === Storage ===
    pub use crate::storage::{InMemoryRecordStore, Latency};

    // === Configuration ===
    pub use crate::config::{CollectionConfig, ListConfig};

    // === Server ===
    pub use crate::server::{ServerBuilder, collection_router};

    // === Re-exports from external crates ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, NaiveDate, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
}
