//! User record

use crate::core::descriptor::{FieldType, FilterFieldDescriptor};
use crate::core::record::RecordId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An employee account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub position: String,
    pub department: String,
    pub status: String,
    pub hire_date: NaiveDate,
    pub employee_id: String,
}

impl_record!(
    User,
    "users",
    search: ["name", "email", "position"],
    fields: {
        "name" => name,
        "email" => email,
        "position" => position,
        "department" => department,
        "status" => status,
        "hire_date" => hire_date,
        "employee_id" => employee_id,
    }
);

impl User {
    /// Fields the filter builder offers for users
    pub fn filter_fields() -> Vec<FilterFieldDescriptor> {
        vec![
            FilterFieldDescriptor::new("name", "Name", FieldType::String),
            FilterFieldDescriptor::new("position", "Position", FieldType::String),
            FilterFieldDescriptor::new("department", "Department", FieldType::String),
            FilterFieldDescriptor::new("status", "Status", FieldType::Status),
            FilterFieldDescriptor::new("email", "Email", FieldType::String),
            FilterFieldDescriptor::new("hire_date", "Hire Date", FieldType::Date),
            FilterFieldDescriptor::new("employee_id", "Employee ID", FieldType::String),
        ]
    }
}
