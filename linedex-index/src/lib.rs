//! # linedex-index
//!
//! The index builder: scan a directory of per-line JSON records, validate
//! and project each against the active schema, sort by `line_code`, and
//! persist the aggregate as `index.json`.
//!
//! Call [`build`] with a [`BuildConfig`]; the returned [`BuildReport`] lists
//! the entry count and every skipped file with its reason. Malformed JSON
//! and duplicate identifiers are fatal — the artifact is left untouched.

pub mod builder;
pub mod error;
mod scan;

pub use builder::{build, BuildConfig, BuildReport, Skip, SkipReason};
pub use error::BuildError;
