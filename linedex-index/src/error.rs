//! Error types for linedex-index.

use std::path::PathBuf;

use thiserror::Error;

use linedex_core::LineCode;

/// Fatal build failures. Per-file read failures and validation misses are
/// not errors; they surface as skips in the build report.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A record file is not valid JSON. The whole build aborts so a
    /// silently-incomplete index is never written.
    #[error("malformed JSON in {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Two record files claim the same identifier.
    #[error("duplicate line_code `{code}`: first in {first}, again in {second}")]
    DuplicateLineCode {
        code: LineCode,
        first: PathBuf,
        second: PathBuf,
    },

    /// An I/O error, with annotated path for context. Raised for directory
    /// enumeration and artifact persistence only.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Artifact serialization error.
    #[error("artifact JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience constructor for [`BuildError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> BuildError {
    BuildError::Io {
        path: path.into(),
        source,
    }
}
