//! # linedex-pages
//!
//! The page emitter: load the aggregate and a single template, then write
//! the template's content verbatim to `<line_code>.html` for every entry
//! with a usable identifier.
//!
//! No substitution is performed — every emitted page is byte-identical to
//! the template. Call [`emit`] with an [`EmitConfig`].

pub mod emitter;
pub mod error;
pub mod writer;

pub use emitter::{emit, EmitConfig, EmitReport, SkippedEntry, PAGE_EXTENSION};
pub use error::EmitError;
pub use writer::WriteResult;
