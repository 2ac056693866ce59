//! List controllers
//!
//! A [`ListController`] owns the query state of one list view, turns UI
//! intents (search, sort, filter, paginate) into fetches against a
//! [`RecordSource`](crate::core::source::RecordSource), and publishes the
//! resulting [`ListView`] on a watch channel.
//!
//! Overlapping fetches resolve last-request-wins: a result that arrives
//! after a newer request was issued is dropped and reported as
//! [`FetchOutcome::Stale`].

pub mod list;
pub mod view;

pub use list::ListController;
pub use view::{FetchOutcome, ListView};
