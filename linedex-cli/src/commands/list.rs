//! `linedex list` — print the aggregate as a table.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;
use tabled::{settings::Style, Table, Tabled};

use linedex_core::{Aggregate, IndexEntry};

/// Arguments for `linedex list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// The aggregate artifact produced by `linedex index`.
    #[arg(long, default_value = "information/index.json")]
    pub artifact: PathBuf,
}

#[derive(Tabled)]
struct LineTableRow {
    #[tabled(rename = "code")]
    code: String,
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "destination")]
    destination: String,
    #[tabled(rename = "company")]
    company: String,
    #[tabled(rename = "service")]
    service: String,
}

/// Render a JSON value for a table cell; strings lose their quotes.
fn cell(entry: &IndexEntry, field: &str) -> String {
    match entry.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

impl ListArgs {
    pub fn run(self) -> Result<()> {
        let text = fs::read_to_string(&self.artifact).with_context(|| {
            format!(
                "cannot read aggregate at '{}' — run `linedex index` first",
                self.artifact.display()
            )
        })?;
        let aggregate = Aggregate::from_json(&text)
            .with_context(|| format!("malformed aggregate at '{}'", self.artifact.display()))?;

        if aggregate.is_empty() {
            println!("Aggregate is empty. Add record files and run `linedex index`.");
            return Ok(());
        }

        let rows: Vec<LineTableRow> = aggregate
            .iter()
            .map(|entry| LineTableRow {
                code: cell(entry, "line_code"),
                name: cell(entry, "line_name"),
                destination: cell(entry, "destination"),
                company: cell(entry, "company"),
                service: cell(entry, "service"),
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        println!("{} lines", aggregate.len());
        Ok(())
    }
}
