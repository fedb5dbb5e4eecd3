//! The build pipeline: scan → parse → validate → project → sort → persist.
//!
//! Error policy per record file:
//! - unreadable (I/O): skip with a warning, keep going
//! - malformed JSON: fatal, abort before any write
//! - parses but not an object, or fails schema validation: skip with a warning
//! - duplicate `line_code`: fatal, abort before any write
//!
//! All parsing and validation completes before the artifact is touched, so
//! the fatal path never leaves a partial index behind.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use linedex_core::{Aggregate, IndexEntry, LineCode, RecordError, SchemaVersion};

use crate::error::{io_err, BuildError};
use crate::scan;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Explicit configuration for one build run. No global path constants;
/// tests point this at temporary directories.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory holding one `.json` record per line.
    pub input_dir: PathBuf,
    /// Where the aggregate is written. May live inside `input_dir`; the
    /// scanner excludes it.
    pub artifact_path: PathBuf,
    /// Schema revision every record is validated against.
    pub schema: SchemaVersion,
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Why a candidate file was left out of the aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The file could not be read.
    Read(String),
    /// The file is valid JSON but not an object.
    NotAnObject,
    /// The record failed schema validation.
    Record(RecordError),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Read(msg) => write!(f, "unreadable: {msg}"),
            SkipReason::NotAnObject => write!(f, "not a JSON object"),
            SkipReason::Record(err) => err.fmt(f),
        }
    }
}

/// One skipped candidate file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skip {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Outcome of a completed (non-fatal) build run.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub artifact_path: PathBuf,
    /// Number of entries in the (written or would-be-written) aggregate.
    pub entries: usize,
    pub skipped: Vec<Skip>,
    pub dry_run: bool,
}

// ---------------------------------------------------------------------------
// build
// ---------------------------------------------------------------------------

/// Run the full pipeline and persist the sorted aggregate to
/// `config.artifact_path` (parent directories are created as needed).
///
/// With `dry_run` the scan, validation, and sort still run, but nothing is
/// written.
pub fn build(config: &BuildConfig, dry_run: bool) -> Result<BuildReport, BuildError> {
    let files = scan::candidates(&config.input_dir, &config.artifact_path)?;

    let mut aggregate = Aggregate::default();
    let mut skipped = Vec::new();
    let mut seen: HashMap<LineCode, PathBuf> = HashMap::new();

    for path in files {
        let contents = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("skipping {}: read failed: {e}", path.display());
                skipped.push(Skip {
                    path,
                    reason: SkipReason::Read(e.to_string()),
                });
                continue;
            }
        };

        let value: Value = serde_json::from_str(&contents).map_err(|e| BuildError::Malformed {
            path: path.clone(),
            source: e,
        })?;
        let record = match value {
            Value::Object(map) => map,
            _ => {
                tracing::warn!("skipping {}: not a JSON object", path.display());
                skipped.push(Skip {
                    path,
                    reason: SkipReason::NotAnObject,
                });
                continue;
            }
        };

        let entry = match IndexEntry::project(&record, config.schema) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("skipping {}: {e}", path.display());
                skipped.push(Skip {
                    path,
                    reason: SkipReason::Record(e),
                });
                continue;
            }
        };

        // Projection guarantees a usable identifier; the fallback arm only
        // defends against future schema edits.
        let Some(code) = entry.line_code().map(LineCode::from) else {
            skipped.push(Skip {
                path,
                reason: SkipReason::Record(RecordError::InvalidLineCode),
            });
            continue;
        };

        if let Some(first) = seen.insert(code.clone(), path.clone()) {
            return Err(BuildError::DuplicateLineCode {
                code,
                first,
                second: path,
            });
        }

        tracing::debug!("indexed {}", path.display());
        aggregate.push(entry);
    }

    aggregate.sort_by_line_code();

    if dry_run {
        tracing::info!(
            "[dry-run] would write {} with {} entries",
            config.artifact_path.display(),
            aggregate.len()
        );
    } else {
        persist(&aggregate, &config.artifact_path)?;
        tracing::info!(
            "wrote {} with {} entries",
            config.artifact_path.display(),
            aggregate.len()
        );
    }

    Ok(BuildReport {
        artifact_path: config.artifact_path.clone(),
        entries: aggregate.len(),
        skipped,
        dry_run,
    })
}

/// Atomically write the aggregate: serialize → `.tmp` sibling → rename.
/// The `.tmp` sibling keeps the rename on one filesystem.
fn persist(aggregate: &Aggregate, path: &Path) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }
    }

    let json = aggregate.to_json()?;
    let tmp = PathBuf::from(format!("{}.tmp", path.display()));
    fs::write(&tmp, json).map_err(|e| io_err(&tmp, e))?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(path, e));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    fn write_record(dir: &Path, name: &str, code: &str) {
        let record = json!({
            "line_code": code,
            "line_name": format!("{code} Line"),
            "destination": "Terminal",
            "company_code": "JE",
            "company": "JR East",
            "service_type": "local",
            "service": "all stations",
            "line_color_1": "#9ACD32",
            "service_color": "#80C241",
            "builder": "JNR",
        });
        fs::write(dir.join(name), serde_json::to_string(&record).expect("encode")).expect("write");
    }

    fn config(dir: &TempDir) -> BuildConfig {
        BuildConfig {
            input_dir: dir.path().to_path_buf(),
            artifact_path: dir.path().join("index.json"),
            schema: SchemaVersion::V2,
        }
    }

    #[test]
    fn builds_sorted_aggregate() {
        let dir = TempDir::new().expect("tempdir");
        write_record(dir.path(), "second.json", "A2");
        write_record(dir.path(), "first.json", "A1");

        let report = build(&config(&dir), false).expect("build");
        assert_eq!(report.entries, 2);
        assert!(report.skipped.is_empty());

        let text = fs::read_to_string(dir.path().join("index.json")).expect("read");
        let aggregate = Aggregate::from_json(&text).expect("decode");
        let codes: Vec<_> = aggregate.iter().filter_map(|e| e.line_code()).collect();
        assert_eq!(codes, vec!["A1", "A2"]);
    }

    #[test]
    fn rebuild_is_byte_identical() {
        let dir = TempDir::new().expect("tempdir");
        write_record(dir.path(), "jy.json", "JY");
        write_record(dir.path(), "jk.json", "JK");

        let cfg = config(&dir);
        build(&cfg, false).expect("first build");
        let first = fs::read(&cfg.artifact_path).expect("read");
        build(&cfg, false).expect("second build");
        let second = fs::read(&cfg.artifact_path).expect("read");
        assert_eq!(first, second, "rebuild on unchanged input must be idempotent");
    }

    #[test]
    fn missing_field_is_skipped_not_fatal() {
        let dir = TempDir::new().expect("tempdir");
        let record = json!({
            "line_code": "JY",
            "line_name": "Yamanote Line",
            // company intentionally absent
            "destination": "Loop service",
            "company_code": "JE",
            "service_type": "local",
            "service": "all stations",
            "line_color_1": "#9ACD32",
            "service_color": "#80C241",
            "builder": "JNR",
        });
        fs::write(
            dir.path().join("jy.json"),
            serde_json::to_string(&record).expect("encode"),
        )
        .expect("write");

        let report = build(&config(&dir), false).expect("build");
        assert_eq!(report.entries, 0);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(
            report.skipped[0].reason,
            SkipReason::Record(RecordError::MissingField { field: "company" })
        );

        let text = fs::read_to_string(dir.path().join("index.json")).expect("read");
        assert_eq!(text, "[]\n");
    }

    #[test]
    fn malformed_json_aborts_without_writing() {
        let dir = TempDir::new().expect("tempdir");
        write_record(dir.path(), "good.json", "A1");
        fs::write(dir.path().join("bad.json"), "{ not json").expect("write");

        let cfg = config(&dir);
        let err = build(&cfg, false).expect_err("must abort");
        assert!(matches!(err, BuildError::Malformed { .. }), "got: {err}");
        assert!(err.to_string().contains("bad.json"));
        assert!(
            !cfg.artifact_path.exists(),
            "artifact must be untouched on the fatal path"
        );
    }

    #[test]
    fn malformed_json_leaves_prior_artifact_unchanged() {
        let dir = TempDir::new().expect("tempdir");
        write_record(dir.path(), "good.json", "A1");

        let cfg = config(&dir);
        build(&cfg, false).expect("first build");
        let before = fs::read(&cfg.artifact_path).expect("read");

        fs::write(dir.path().join("bad.json"), "][").expect("write");
        build(&cfg, false).expect_err("must abort");
        let after = fs::read(&cfg.artifact_path).expect("read");
        assert_eq!(before, after);
    }

    #[test]
    fn duplicate_line_code_is_fatal() {
        let dir = TempDir::new().expect("tempdir");
        write_record(dir.path(), "a.json", "JY");
        write_record(dir.path(), "b.json", "JY");

        let cfg = config(&dir);
        let err = build(&cfg, false).expect_err("must abort");
        match &err {
            BuildError::DuplicateLineCode { code, first, second } => {
                assert_eq!(code, &LineCode::from("JY"));
                assert!(first.ends_with("a.json"));
                assert!(second.ends_with("b.json"));
            }
            other => panic!("expected DuplicateLineCode, got: {other}"),
        }
        assert!(!cfg.artifact_path.exists());
    }

    #[test]
    fn non_object_json_is_skipped() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(dir.path().join("list.json"), "[1, 2, 3]").expect("write");

        let report = build(&config(&dir), false).expect("build");
        assert_eq!(report.entries, 0);
        assert_eq!(report.skipped[0].reason, SkipReason::NotAnObject);
    }

    #[test]
    fn dry_run_writes_nothing() {
        let dir = TempDir::new().expect("tempdir");
        write_record(dir.path(), "jy.json", "JY");

        let cfg = config(&dir);
        let report = build(&cfg, true).expect("build");
        assert_eq!(report.entries, 1);
        assert!(report.dry_run);
        assert!(!cfg.artifact_path.exists(), "dry-run must not write");
    }

    #[test]
    fn prior_artifact_in_input_dir_is_not_ingested() {
        let dir = TempDir::new().expect("tempdir");
        write_record(dir.path(), "jy.json", "JY");

        let cfg = config(&dir);
        build(&cfg, false).expect("first build");
        // Second build scans a directory that now also contains index.json.
        let report = build(&cfg, false).expect("second build");
        assert_eq!(report.entries, 1);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn tmp_sibling_removed_after_write() {
        let dir = TempDir::new().expect("tempdir");
        write_record(dir.path(), "jy.json", "JY");

        let cfg = config(&dir);
        build(&cfg, false).expect("build");
        let tmp = PathBuf::from(format!("{}.tmp", cfg.artifact_path.display()));
        assert!(!tmp.exists(), ".tmp must be gone after a successful build");
    }

    #[test]
    fn unreadable_file_is_skipped_with_warning() {
        let dir = TempDir::new().expect("tempdir");
        write_record(dir.path(), "ok.json", "A1");
        // Not valid UTF-8: the read itself fails, which is recoverable
        // (unlike a decode failure on text that did read).
        fs::write(dir.path().join("binary.json"), [0xff, 0xfe, 0x00, 0x80]).expect("write");

        let report = build(&config(&dir), false).expect("build");
        assert_eq!(report.entries, 1);
        assert_eq!(report.skipped.len(), 1);
        assert!(matches!(report.skipped[0].reason, SkipReason::Read(_)));
    }
}
