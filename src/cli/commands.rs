//! Command handlers. Errors surface as `anyhow` with the failing step named.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use super::args::OutputFormat;
use crate::config::resolve_config;
use crate::io::{load_pages, load_runs};
use crate::observability::{set_phase, ReportPhase};
use crate::output::{self, write_report};
use crate::report::build_report;
use crate::schema::StructureInventory;

pub struct GenerateOptions {
    pub pages: PathBuf,
    pub runs: Option<PathBuf>,
    pub run_ids: Vec<String>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

pub fn handle_generate_command(options: GenerateOptions) -> Result<()> {
    let config = resolve_config(options.config.as_deref()).context("Failed to load config")?;
    let pages = load_pages(&options.pages, &options.run_ids)?;
    let runs = match &options.runs {
        Some(path) => load_runs(path, &options.run_ids)?,
        None => Vec::new(),
    };

    let report = build_report(&pages, &runs, &config)?;
    let format: output::OutputFormat = options
        .format
        .map(Into::into)
        .unwrap_or_else(|| config.default_format());

    let _phase = set_phase(ReportPhase::OutputGeneration);
    write_report(&report, format, options.output.as_deref())
        .with_context(|| match &options.output {
            Some(path) => format!("Failed to write report to {}", path.display()),
            None => "Failed to write report".to_string(),
        })?;
    if let Some(path) = &options.output {
        info!(path = %path.display(), "report written");
    }
    Ok(())
}

pub fn handle_schema_command(pages: &Path) -> Result<()> {
    let pages = load_pages(pages, &[])?;
    let inventory = StructureInventory::from_pages(&pages);
    let stdout = std::io::stdout();
    write_inventory(&mut stdout.lock(), &inventory).context("Failed to print schema")
}

/// One block per test: the id, then its paths indented and sorted.
pub fn write_inventory<W: Write>(out: &mut W, inventory: &StructureInventory) -> std::io::Result<()> {
    for (test_id, paths) in &inventory.structures {
        writeln!(out, "{test_id}")?;
        for path in paths {
            writeln!(out, "  {path}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
