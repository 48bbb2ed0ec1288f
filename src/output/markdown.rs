use std::io::{self, Write};

use super::tables::{report_sections, Section};
use super::ReportWriter;
use crate::report::Report;

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_section(&mut self, section: &Section) -> io::Result<()> {
        writeln!(self.writer, "## {}", section.title)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| {} |", join_cells(&section.headers))?;
        writeln!(
            self.writer,
            "|{}|",
            vec!["---"; section.headers.len()].join("|")
        )?;
        for row in &section.rows {
            writeln!(self.writer, "| {} |", join_cells(row))?;
        }
        writeln!(self.writer)
    }
}

impl<W: Write> ReportWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &Report) -> io::Result<()> {
        writeln!(self.writer, "# Accessibility Test Report")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "Generated: {}", report.summary.completion_time)?;
        writeln!(self.writer)?;
        for section in report_sections(report) {
            self.write_section(&section)?;
        }
        self.writer.flush()
    }
}

fn join_cells(cells: &[String]) -> String {
    cells
        .iter()
        .map(|cell| escape_cell(cell))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Pipes would end the cell and newlines the row.
fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace('\n', "<br>")
}
