//! The emit pass: `indexed → emitted`, one page per valid aggregate entry.

use std::fs;
use std::path::PathBuf;

use linedex_core::Aggregate;

use crate::error::{io_err, EmitError};
use crate::writer::{write_page, WriteResult};

/// Extension of every emitted page.
pub const PAGE_EXTENSION: &str = "html";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Explicit configuration for one emit run.
#[derive(Debug, Clone)]
pub struct EmitConfig {
    /// The aggregate artifact produced by the index builder.
    pub artifact_path: PathBuf,
    /// The shared template; copied verbatim into every page.
    pub template_path: PathBuf,
    /// Directory pages are written to; created if absent.
    pub output_dir: PathBuf,
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// An aggregate entry that could not be emitted: no usable identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Zero-based position of the entry in the aggregate.
    pub position: usize,
}

/// Outcome of a completed emit run.
#[derive(Debug, Clone)]
pub struct EmitReport {
    pub pages: Vec<WriteResult>,
    pub skipped: Vec<SkippedEntry>,
    pub dry_run: bool,
}

// ---------------------------------------------------------------------------
// emit
// ---------------------------------------------------------------------------

/// Emit one `<line_code>.html` per aggregate entry with a usable identifier.
///
/// The aggregate and template are each read once. Entries without a usable
/// identifier are skipped with a warning and reported; they never abort the
/// run. With `dry_run` nothing is written and the output directory is not
/// created.
pub fn emit(config: &EmitConfig, dry_run: bool) -> Result<EmitReport, EmitError> {
    let index_text = fs::read_to_string(&config.artifact_path)
        .map_err(|e| io_err(&config.artifact_path, e))?;
    let aggregate = Aggregate::from_json(&index_text).map_err(|e| EmitError::Index {
        path: config.artifact_path.clone(),
        source: e,
    })?;
    let template = fs::read_to_string(&config.template_path)
        .map_err(|e| io_err(&config.template_path, e))?;

    if !dry_run {
        fs::create_dir_all(&config.output_dir).map_err(|e| io_err(&config.output_dir, e))?;
    }

    let mut pages = Vec::new();
    let mut skipped = Vec::new();
    for (position, entry) in aggregate.iter().enumerate() {
        let Some(code) = entry.line_code() else {
            tracing::warn!("skipping aggregate entry #{position}: no usable line_code");
            skipped.push(SkippedEntry { position });
            continue;
        };
        let path = config.output_dir.join(format!("{code}.{PAGE_EXTENSION}"));
        pages.push(write_page(&path, &template, dry_run)?);
    }

    tracing::info!(
        "emitted {} pages into {} ({} skipped)",
        pages.len(),
        config.output_dir.display(),
        skipped.len()
    );
    Ok(EmitReport {
        pages,
        skipped,
        dry_run,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
