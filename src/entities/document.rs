//! Document record

use crate::core::descriptor::{FieldType, FilterFieldDescriptor};
use crate::core::record::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored document and its metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: RecordId,
    pub title: String,
    pub description: String,

    /// File type (PDF, DOCX, ...)
    #[serde(rename = "type")]
    pub doc_type: String,

    /// Size in bytes
    pub size: u64,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status: String,
    pub tags: Vec<String>,
}

impl_record!(
    Document,
    "documents",
    search: ["title", "description", "created_by"],
    fields: {
        "title" => title,
        "description" => description,
        "type" => doc_type,
        "size" => size,
        "created_by" => created_by,
        "created_at" => created_at,
        "updated_at" => updated_at,
        "status" => status,
        "tags" => tags,
    },
    touch: updated_at
);

impl Document {
    /// Fields the filter builder offers for documents
    pub fn filter_fields() -> Vec<FilterFieldDescriptor> {
        vec![
            FilterFieldDescriptor::new("title", "Title", FieldType::String),
            FilterFieldDescriptor::new("description", "Description", FieldType::String),
            FilterFieldDescriptor::new("type", "File Type", FieldType::String),
            FilterFieldDescriptor::new("status", "Status", FieldType::Status),
            FilterFieldDescriptor::new("created_by", "Created By", FieldType::String),
            FilterFieldDescriptor::new("created_at", "Created Date", FieldType::Date),
            FilterFieldDescriptor::new("updated_at", "Updated Date", FieldType::Date),
            FilterFieldDescriptor::new("tags", "Tags", FieldType::Array),
        ]
    }
}
