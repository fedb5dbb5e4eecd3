//! `linedex pages` — copy the template to one page per aggregate entry.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use linedex_pages::{emit, EmitConfig, EmitReport, WriteResult};

/// Arguments for `linedex pages`.
#[derive(Args, Debug)]
pub struct PagesArgs {
    /// The aggregate artifact produced by `linedex index`.
    #[arg(long, default_value = "information/index.json")]
    pub artifact: PathBuf,

    /// Template file copied verbatim into every page.
    #[arg(long, default_value = "pages/template.html")]
    pub template: PathBuf,

    /// Directory pages are written to.
    #[arg(long, default_value = "pages")]
    pub out_dir: PathBuf,

    /// Show what would be written without touching the filesystem.
    #[arg(long)]
    pub dry_run: bool,
}

impl PagesArgs {
    pub fn run(self) -> Result<()> {
        let config = EmitConfig {
            artifact_path: self.artifact.clone(),
            template_path: self.template,
            output_dir: self.out_dir,
        };
        let report = emit(&config, self.dry_run)
            .with_context(|| format!("page emission failed for '{}'", self.artifact.display()))?;
        print_emit_report(&report);
        Ok(())
    }
}

pub(crate) fn print_emit_report(report: &EmitReport) {
    for skip in &report.skipped {
        println!(
            "{} skipped aggregate entry #{}: no usable line_code",
            "⚠".yellow(),
            skip.position
        );
    }

    let written = report
        .pages
        .iter()
        .filter(|r| matches!(r, WriteResult::Written { .. } | WriteResult::WouldWrite { .. }))
        .count();
    let unchanged = report.pages.len() - written;

    let prefix = if report.dry_run { "[dry-run] " } else { "" };
    println!(
        "{prefix}✓ {} pages ({written} written, {unchanged} unchanged, {} skipped)",
        report.pages.len(),
        report.skipped.len()
    );
    for r in &report.pages {
        match r {
            WriteResult::Written { path } => println!("  ✎  {}", path.display()),
            WriteResult::WouldWrite { path } => println!("  ~  {}", path.display()),
            WriteResult::Unchanged { path } => println!("  ·  {}", path.display()),
        }
    }
}
