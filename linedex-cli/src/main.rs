//! Linedex — rail-line index builder and static page emitter.
//!
//! # Usage
//!
//! ```text
//! linedex index [--input <dir>] [--artifact <file>] [--schema v1|v2] [--dry-run]
//! linedex pages [--artifact <file>] [--template <file>] [--out-dir <dir>] [--dry-run]
//! linedex run   [index + pages flags]
//! linedex list  [--artifact <file>]
//! ```

mod commands;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{index::IndexArgs, list::ListArgs, pages::PagesArgs, run::RunArgs};
use linedex_core::SchemaVersion;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "linedex",
    version,
    about = "Aggregate per-line JSON records into a sorted index and stamp out static pages",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan record files and build the sorted aggregate index.
    Index(IndexArgs),

    /// Emit one template-copy page per aggregate entry.
    Pages(PagesArgs),

    /// Run both stages in sequence: index, then pages.
    Run(RunArgs),

    /// Print the aggregate as a table.
    List(ListArgs),
}

// ---------------------------------------------------------------------------
// Shared SchemaVersion argument — parsed from CLI strings, converts to core type
// ---------------------------------------------------------------------------

/// Thin wrapper so clap can parse `SchemaVersion` from CLI args.
#[derive(Debug, Clone, Default)]
pub struct SchemaVersionArg(pub SchemaVersion);

impl FromStr for SchemaVersionArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "v1" | "1" => Ok(Self(SchemaVersion::V1)),
            "v2" | "2" => Ok(Self(SchemaVersion::V2)),
            other => Err(format!("unknown schema version '{other}'; expected: v1, v2")),
        }
    }
}

impl fmt::Display for SchemaVersionArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<SchemaVersionArg> for SchemaVersion {
    fn from(s: SchemaVersionArg) -> Self {
        s.0
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Index(args) => args.run(),
        Commands::Pages(args) => args.run(),
        Commands::Run(args) => args.run(),
        Commands::List(args) => args.run(),
    }
}
