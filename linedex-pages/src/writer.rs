//! Hash-gated atomic page writer.
//!
//! Write protocol per page:
//!
//! 1. SHA-256 hash the target content.
//! 2. Hash whatever is on disk at the target path (if anything).
//! 3. Identical → skip, report unchanged.
//! 4. Otherwise write to a `.linedex.tmp` sibling and rename into place
//!    (atomic on POSIX).
//!
//! Comparing against the on-disk file rather than a stored digest keeps the
//! pipeline free of run state beyond its two artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::{io_err, EmitError};

/// Outcome of an individual page write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// File was skipped — on-disk content already matches.
    Unchanged { path: PathBuf },
    /// Dry-run mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path }
            | WriteResult::Unchanged { path }
            | WriteResult::WouldWrite { path } => path,
        }
    }
}

fn digest(bytes: &[u8]) -> String {
    let mut h = Sha256::new();
    h.update(bytes);
    hex::encode(h.finalize())
}

/// Atomically write `content` to `path`, skipping the write when the file
/// already holds identical bytes.
pub(crate) fn write_page(
    path: &Path,
    content: &str,
    dry_run: bool,
) -> Result<WriteResult, EmitError> {
    if let Ok(existing) = fs::read(path) {
        if digest(&existing) == digest(content.as_bytes()) {
            tracing::debug!("unchanged: {}", path.display());
            return Ok(WriteResult::Unchanged {
                path: path.to_path_buf(),
            });
        }
    }

    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    let tmp = PathBuf::from(format!("{}.linedex.tmp", path.display()));
    fs::write(&tmp, content).map_err(|e| io_err(&tmp, e))?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}
