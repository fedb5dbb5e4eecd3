//! `linedex index` — scan, validate, sort, and persist the aggregate.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use linedex_index::{build, BuildConfig, BuildReport};

use super::super::SchemaVersionArg;

/// Arguments for `linedex index`.
#[derive(Args, Debug)]
pub struct IndexArgs {
    /// Directory holding one JSON record per line.
    #[arg(long, default_value = "information")]
    pub input: PathBuf,

    /// Path the aggregate artifact is written to.
    #[arg(long, default_value = "information/index.json")]
    pub artifact: PathBuf,

    /// Record schema revision: v1 | v2.
    #[arg(long, value_name = "VERSION", default_value = "v2")]
    pub schema: SchemaVersionArg,

    /// Validate and sort without writing the artifact.
    #[arg(long)]
    pub dry_run: bool,
}

impl IndexArgs {
    pub fn run(self) -> Result<()> {
        let config = BuildConfig {
            input_dir: self.input.clone(),
            artifact_path: self.artifact,
            schema: self.schema.into(),
        };
        let report = build(&config, self.dry_run)
            .with_context(|| format!("index build failed for '{}'", self.input.display()))?;
        print_build_report(&report);
        Ok(())
    }
}

pub(crate) fn print_build_report(report: &BuildReport) {
    for skip in &report.skipped {
        println!(
            "{} skipped {}: {}",
            "⚠".yellow(),
            skip.path.display(),
            skip.reason
        );
    }
    let prefix = if report.dry_run { "[dry-run] " } else { "" };
    println!(
        "{prefix}✓ {} — {} entries ({} skipped)",
        report.artifact_path.display(),
        report.entries,
        report.skipped.len()
    );
}
