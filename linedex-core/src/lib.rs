//! Linedex core library — domain types, record schema, projection, errors.
//!
//! Public API surface:
//! - [`types`] — [`LineCode`], [`IndexEntry`], [`Aggregate`]
//! - [`schema`] — versioned required/optional field sets
//! - [`error`] — [`RecordError`]

pub mod error;
pub mod schema;
pub mod types;

pub use error::RecordError;
pub use schema::SchemaVersion;
pub use types::{Aggregate, IndexEntry, LineCode};
