//! Renderers for a built [`Report`](crate::report::Report).

pub mod json;
pub mod markdown;
pub mod tables;
pub mod terminal;

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::report::Report;

pub use json::JsonWriter;
pub use markdown::MarkdownWriter;
pub use terminal::TerminalWriter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Markdown,
    #[default]
    Terminal,
}

pub trait ReportWriter {
    fn write_report(&mut self, report: &Report) -> io::Result<()>;
}

fn writer_for<'a, W: Write + 'a>(format: OutputFormat, out: W) -> Box<dyn ReportWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(out)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(out)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(out)),
    }
}

/// Render to `path` (creating parent directories) or to stdout.
pub fn write_report(report: &Report, format: OutputFormat, path: Option<&Path>) -> io::Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let file = io::BufWriter::new(fs::File::create(path)?);
            writer_for(format, file).write_report(report)
        }
        None => writer_for(format, io::stdout().lock()).write_report(report),
    }
}
