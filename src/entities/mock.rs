//! Deterministic mock datasets
//!
//! Values cycle through fixed pools by index so that tests and demos see the
//! same records on every run.

use crate::entities::{Document, User};
use chrono::{Duration, NaiveDate, TimeZone, Utc};

pub const DOCUMENT_TYPES: &[&str] = &["PDF", "DOCX", "XLS", "TXT", "JPG"];
pub const DOCUMENT_AUTHORS: &[&str] = &["John Doe", "Jane Smith", "Bob Johnson", "Alice Williams"];
pub const DOCUMENT_STATUSES: &[&str] = &["Draft", "Published", "Archived", "Under Review"];
pub const DOCUMENT_TAGS: &[&str] = &[
    "Important",
    "Confidential",
    "Public",
    "Internal",
    "External",
    "Legal",
];

pub const USER_POSITIONS: &[&str] = &[
    "Software Engineer",
    "Senior Software Engineer",
    "Lead Developer",
    "Full Stack Developer",
    "Product Manager",
    "Product Owner",
    "UX Designer",
    "Design Lead",
    "Data Analyst",
    "Data Scientist",
    "Data Engineer",
];
pub const USER_DEPARTMENTS: &[&str] = &[
    "Engineering",
    "Product",
    "Design",
    "Marketing",
    "Sales",
    "Finance",
    "HR",
    "Operations",
    "Customer Support",
];
pub const USER_STATUSES: &[&str] = &[
    "Active",
    "On Leave",
    "Remote",
    "Inactive",
    "Probation",
    "Contract",
];

const FIRST_NAMES: &[&str] = &["John", "Jane", "Bob", "Alice", "Maria", "Omar", "Li", "Priya"];
const LAST_NAMES: &[&str] = &["Doe", "Smith", "Johnson", "Williams", "Garcia", "Khan", "Wei"];

fn pick(pool: &[&str], i: usize) -> String {
    pool[i % pool.len()].to_string()
}

/// `n` documents with IDs `1..=n`
///
/// Document `i` (zero-based) has type `DOCUMENT_TYPES[i % 5]`, author
/// `DOCUMENT_AUTHORS[i % 4]` and status `DOCUMENT_STATUSES[i % 4]`.
pub fn mock_documents(n: usize) -> Vec<Document> {
    let epoch = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).single().unwrap_or_default();

    (0..n)
        .map(|i| {
            let number = i + 1;
            let created_at = epoch - Duration::hours((i as i64 * 37) % 2_800);
            let tag_count = i % 3 + 1;
            Document {
                id: number as u64,
                title: format!("Document {}", number),
                description: format!("This is the description for document {}", number),
                doc_type: pick(DOCUMENT_TYPES, i),
                size: 100 + (i as u64 * 7_919) % 10_000,
                created_by: pick(DOCUMENT_AUTHORS, i),
                created_at,
                updated_at: created_at + Duration::hours((i as i64 * 13) % 240),
                status: pick(DOCUMENT_STATUSES, i),
                tags: (0..tag_count).map(|t| pick(DOCUMENT_TAGS, i + t)).collect(),
            }
        })
        .collect()
}

/// `n` users with IDs `1..=n`
pub fn mock_users(n: usize) -> Vec<User> {
    let first_hire = NaiveDate::from_ymd_opt(2018, 1, 15).unwrap_or_default();

    (0..n)
        .map(|i| {
            let number = i + 1;
            let first = FIRST_NAMES[i % FIRST_NAMES.len()];
            let last = LAST_NAMES[i % LAST_NAMES.len()];
            User {
                id: number as u64,
                name: format!("{} {}", first, last),
                email: format!(
                    "{}.{}{}@example.com",
                    first.to_lowercase(),
                    last.to_lowercase(),
                    number
                ),
                position: pick(USER_POSITIONS, i),
                department: pick(USER_DEPARTMENTS, i),
                status: pick(USER_STATUSES, i),
                hire_date: first_hire + Duration::days(i as i64 * 23),
                employee_id: format!("EMP{:04}", number),
            }
        })
        .collect()
}
