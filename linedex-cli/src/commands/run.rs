//! `linedex run` — both stages in sequence: index, then pages.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use linedex_index::{build, BuildConfig};
use linedex_pages::{emit, EmitConfig};

use super::super::SchemaVersionArg;
use super::{index::print_build_report, pages::print_emit_report};

/// Arguments for `linedex run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Directory holding one JSON record per line.
    #[arg(long, default_value = "information")]
    pub input: PathBuf,

    /// Path the aggregate artifact is written to and read back from.
    #[arg(long, default_value = "information/index.json")]
    pub artifact: PathBuf,

    /// Record schema revision: v1 | v2.
    #[arg(long, value_name = "VERSION", default_value = "v2")]
    pub schema: SchemaVersionArg,

    /// Template file copied verbatim into every page.
    #[arg(long, default_value = "pages/template.html")]
    pub template: PathBuf,

    /// Directory pages are written to.
    #[arg(long, default_value = "pages")]
    pub out_dir: PathBuf,

    /// Show what both stages would write without touching the filesystem.
    /// The pages stage then reads the prior artifact, if any.
    #[arg(long)]
    pub dry_run: bool,
}

impl RunArgs {
    pub fn run(self) -> Result<()> {
        let build_config = BuildConfig {
            input_dir: self.input.clone(),
            artifact_path: self.artifact.clone(),
            schema: self.schema.into(),
        };
        let build_report = build(&build_config, self.dry_run)
            .with_context(|| format!("index build failed for '{}'", self.input.display()))?;
        print_build_report(&build_report);

        // In dry-run the build wrote nothing; the pages stage can only
        // preview against an artifact from an earlier real run.
        if self.dry_run && !self.artifact.exists() {
            println!(
                "[dry-run] no artifact at {}; skipping pages stage",
                self.artifact.display()
            );
            return Ok(());
        }

        let emit_config = EmitConfig {
            artifact_path: self.artifact.clone(),
            template_path: self.template,
            output_dir: self.out_dir,
        };
        let emit_report = emit(&emit_config, self.dry_run)
            .with_context(|| format!("page emission failed for '{}'", self.artifact.display()))?;
        print_emit_report(&emit_report);
        Ok(())
    }
}
