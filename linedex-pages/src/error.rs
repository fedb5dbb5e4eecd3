//! Error types for linedex-pages.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal emit failures. Entries without a usable identifier are not errors;
/// they surface as skips in the emit report.
#[derive(Debug, Error)]
pub enum EmitError {
    /// The aggregate artifact is not a valid JSON array of objects.
    #[error("failed to parse aggregate at {path}: {source}")]
    Index {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An I/O error, with annotated path for context (artifact read,
    /// template read, output directory, or page write).
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`EmitError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> EmitError {
    EmitError::Io {
        path: path.into(),
        source,
    }
}
