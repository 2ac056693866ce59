//! HTTP exposure of list collections

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use router::collection_router;
