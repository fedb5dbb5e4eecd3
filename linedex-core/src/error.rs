//! Error types for linedex-core.

use thiserror::Error;

/// Why a parsed record cannot be projected into an [`crate::IndexEntry`].
///
/// These are per-record validation failures; callers treat them as
/// recoverable (skip the record, keep the batch going).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// A field from the schema's required set is absent.
    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },

    /// `line_code` is present but not usable as an identifier: it must be a
    /// non-empty JSON string without path separators.
    #[error("`line_code` must be a non-empty string without path separators")]
    InvalidLineCode,
}
