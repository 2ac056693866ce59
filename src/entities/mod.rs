//! Record types of the dashboard collections
//!
//! - [`User`]: employees, searched by name, email and position
//! - [`Document`]: files, searched by title, description and author
//!
//! [`mock`] provides deterministic datasets for both.

#[macro_use]
pub mod macros;

pub mod document;
pub mod mock;
pub mod user;

pub use document::Document;
pub use user::User;
