use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use std::io::{self, Write};

use super::tables::{report_sections, Section};
use super::ReportWriter;
use crate::report::Report;

/// Tables rendered with comfy-table. Colors follow `colored`'s environment
/// detection, so `NO_COLOR` disables them.
pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

fn use_color() -> bool {
    colored::control::SHOULD_COLORIZE.should_colorize()
}

fn status_color(text: &str) -> Option<Color> {
    match text {
        "Issues Found" => Some(Color::Red),
        "Pass" => Some(Color::Green),
        "Not Tested" => Some(Color::DarkGrey),
        _ => None,
    }
}

fn build_table(section: &Section, color: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(section.headers.iter().map(Cell::new));
    if !color {
        table.force_no_tty();
    }
    for row in &section.rows {
        table.add_row(row.iter().map(|text| {
            let cell = Cell::new(text);
            match status_color(text).filter(|_| color) {
                Some(fg) => cell.fg(fg),
                None => cell,
            }
        }));
    }
    table
}

impl<W: Write> ReportWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &Report) -> io::Result<()> {
        let color = use_color();
        let rule = "═══════════════════════════════════════════";
        writeln!(self.writer)?;
        if color {
            writeln!(self.writer, "{}", rule.cyan())?;
            writeln!(self.writer, "{}", "       ACCESSIBILITY TEST REPORT".bold().cyan())?;
            writeln!(self.writer, "{}", rule.cyan())?;
        } else {
            writeln!(self.writer, "{rule}")?;
            writeln!(self.writer, "       ACCESSIBILITY TEST REPORT")?;
            writeln!(self.writer, "{rule}")?;
        }
        for section in report_sections(report) {
            writeln!(self.writer)?;
            if color {
                writeln!(self.writer, "{}", section.title.bold())?;
            } else {
                writeln!(self.writer, "{}", section.title)?;
            }
            writeln!(self.writer, "{}", build_table(&section, color))?;
        }
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use crate::report::build_report;

    #[test]
    fn test_plain_table_contains_cells() {
        let section = Section {
            title: "Summary".into(),
            headers: vec!["Metric".into(), "Value".into()],
            rows: vec![vec!["Total Pages".into(), "3".into()]],
        };
        let rendered = build_table(&section, false).to_string();
        assert!(rendered.contains("Total Pages"));
        assert!(rendered.contains("Metric"));
        assert!(!rendered.contains('\u{1b}'));
    }

    #[test]
    fn test_terminal_report_renders_summary() {
        let report = build_report(&[], &[], &ReportConfig::default()).unwrap();
        let mut buffer = Vec::new();
        TerminalWriter::new(&mut buffer).write_report(&report).unwrap();
        let text = String::from_utf8_lossy(&buffer);
        assert!(text.contains("Summary"));
        assert!(text.contains("Total Pages"));
    }

    #[test]
    fn test_status_colors() {
        assert_eq!(status_color("Pass"), Some(Color::Green));
        assert_eq!(status_color("Forms"), None);
    }
}
