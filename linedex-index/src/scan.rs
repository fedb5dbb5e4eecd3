//! Candidate enumeration for the index builder.

use std::path::{Path, PathBuf};

use crate::error::{io_err, BuildError};

/// True when `path` is the aggregate artifact itself, which must never be
/// re-ingested as a record.
fn is_artifact(path: &Path, artifact: &Path, input_dir: &Path) -> bool {
    path == artifact
        || (artifact.parent() == Some(input_dir) && path.file_name() == artifact.file_name())
}

/// List record candidates in `input_dir`: regular `.json` files, excluding
/// the artifact, in sorted file-name order.
///
/// A missing input directory is created and yields an empty candidate set,
/// so a first run against a fresh tree produces an empty aggregate instead
/// of failing.
pub(crate) fn candidates(input_dir: &Path, artifact: &Path) -> Result<Vec<PathBuf>, BuildError> {
    if !input_dir.exists() {
        std::fs::create_dir_all(input_dir).map_err(|e| io_err(input_dir, e))?;
        tracing::info!("created empty input directory {}", input_dir.display());
        return Ok(vec![]);
    }

    let mut entries: Vec<_> = std::fs::read_dir(input_dir)
        .map_err(|e| io_err(input_dir, e))?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .collect();
    entries.sort_by_key(|e| e.file_name());

    Ok(entries
        .into_iter()
        .map(|e| e.path())
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("json"))
        .filter(|p| !is_artifact(p, artifact, input_dir))
        .collect())
}
