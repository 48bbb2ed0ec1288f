//! Tabular view of a [`Report`] shared by the text renderers.

use crate::detailed::DetailedColumn;
use crate::report::Report;
use crate::responsive::{BreakpointSummaryRow, SeverityBand};

/// One titled table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Section {
    fn new<H: Into<String>>(title: &str, headers: impl IntoIterator<Item = H>) -> Self {
        Self {
            title: title.to_string(),
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }
}

fn or_dash(value: Option<usize>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn blank_zero(count: usize) -> String {
    if count == 0 {
        String::new()
    } else {
        count.to_string()
    }
}

pub fn summary_section(report: &Report) -> Section {
    let s = &report.summary;
    let mut section = Section::new("Summary", ["Metric", "Value"]);
    section.row(vec!["Total Pages".into(), s.total_pages.to_string()]);
    section.row(vec!["Pages with Issues".into(), s.pages_with_issues.to_string()]);
    section.row(vec!["Total Issues".into(), s.total_issues.to_string()]);
    section.row(vec!["Completion Time".into(), s.completion_time.clone()]);
    section
}

/// All sections in report order; empty tables are left out.
pub fn report_sections(report: &Report) -> Vec<Section> {
    let mut sections = vec![summary_section(report)];

    let mut by_type = Section::new("Issues by Type", ["Issue Type", "Count"]);
    for entry in &report.issues_by_type {
        by_type.row(vec![entry.issue_type.clone(), entry.count.to_string()]);
    }
    sections.push(by_type);

    let mut by_page = Section::new("Issues by URL", ["URL", "Issue Type", "Count", "Details"]);
    for entry in &report.issues_by_page {
        by_page.row(vec![
            entry.scope.clone(),
            entry.issue_type.clone(),
            entry.count.to_string(),
            entry.details.clone().unwrap_or_default(),
        ]);
    }
    sections.push(by_page);

    let mut by_site = Section::new("Issues by Site", ["Site", "Issue Type", "Count", "Pages Affected"]);
    for entry in &report.issues_by_site {
        by_site.row(vec![
            entry.scope.clone(),
            entry.issue_type.clone(),
            entry.count.to_string(),
            entry.pages_affected.to_string(),
        ]);
    }
    sections.push(by_site);

    let mut docs = Section::new(
        "Test Documentation",
        [
            "Test Name",
            "Type",
            "Description",
            "Version",
            "Date",
            "WCAG Criteria",
            "Impact",
            "How to Fix",
        ],
    );
    for row in &report.documentation {
        docs.row(vec![
            row.test_name.clone(),
            row.kind.as_str().to_string(),
            row.description.clone(),
            row.version.clone(),
            row.date.clone(),
            row.wcag_criteria.clone(),
            row.impact.clone(),
            row.how_to_fix.clone(),
        ]);
    }
    sections.push(docs);

    sections.extend(responsive_sections(report));
    sections.push(detailed_section(report));
    sections.retain(|section| !section.rows.is_empty());
    sections
}

fn responsive_sections(report: &Report) -> Vec<Section> {
    let responsive = &report.responsive;
    let bp_headers = || responsive.breakpoints.iter().map(|bp| format!("{bp}px"));

    let mut matrix = Section::new(
        "Responsive Testing Matrix",
        ["Domain", "Page", "Breakpoint", "Test", "Status", "Issue Count", "Issue Details"],
    );
    for row in &report.breakpoint_matrix {
        matrix.row(vec![
            row.domain.clone(),
            row.page.clone(),
            row.breakpoint.to_string(),
            row.test.clone(),
            row.status.to_string(),
            or_dash(row.issue_count),
            row.issue_details.clone(),
        ]);
    }

    let mut summary = Section::new(
        "Responsive Breakpoint Summary",
        [
            "URL",
            "Total Breakpoints Tested",
            "Breakpoints with Issues",
            "Total Issues",
            "Overflow Issues",
            "Touch Target Issues",
            "Font Scaling Issues",
            "Fixed Position Issues",
            "Content Stacking Issues",
            "Breakpoints Tested",
        ],
    );
    for row in &responsive.breakpoint_summary {
        match row {
            BreakpointSummaryRow::Page {
                url,
                breakpoints_tested,
                affected_breakpoints,
                total_issues,
                overflow_issues,
                touch_target_issues,
                font_scaling_issues,
                fixed_position_issues,
                content_stacking_issues,
                tested,
            } => summary.row(vec![
                url.clone(),
                breakpoints_tested.to_string(),
                affected_breakpoints.to_string(),
                total_issues.to_string(),
                overflow_issues.to_string(),
                touch_target_issues.to_string(),
                font_scaling_issues.to_string(),
                fixed_position_issues.to_string(),
                content_stacking_issues.to_string(),
                tested.clone(),
            ]),
            BreakpointSummaryRow::Breakpoint {
                url,
                breakpoint,
                total_issues,
                details,
            } => {
                let mut cells = vec![String::new(); 10];
                cells[0] = format!("  -- {url} @ {breakpoint}px");
                cells[3] = total_issues.to_string();
                cells[9] = details.clone();
                summary.row(cells);
            }
        }
    }

    let mut by_bp = Section::new("Issues by Breakpoint", ["Breakpoint (px)", "Issues"]);
    for bp in &responsive.breakpoints {
        let count = responsive.issues_by_breakpoint.get(bp).copied().unwrap_or(0);
        by_bp.row(vec![bp.to_string(), count.to_string()]);
    }

    let mut totals = Section::new("Issues by Type (Consolidated)", ["Issue Type", "Count"]);
    if !responsive.breakpoint_summary.is_empty() {
        for entry in &responsive.consolidated_totals {
            totals.row(vec![entry.issue_type.clone(), entry.count.to_string()]);
        }
    }

    let mut heatmap = Section::new(
        "Breakpoint Issues Heatmap by Domain",
        std::iter::once("Domain".to_string()).chain(bp_headers()),
    );
    for row in &responsive.heatmap {
        let mut cells = vec![row.domain.clone()];
        cells.extend(responsive.breakpoints.iter().map(|bp| {
            row.cells
                .get(bp)
                .map(|cell| heat_label(cell.count, cell.band))
                .unwrap_or_default()
        }));
        heatmap.row(cells);
    }

    let mut trend = Section::new(
        "Issue Trends by Test Type",
        std::iter::once("Test Type".to_string()).chain(bp_headers()),
    );
    for row in &responsive.trend {
        let mut cells = vec![row.label.clone()];
        cells.extend(
            responsive
                .breakpoints
                .iter()
                .map(|bp| blank_zero(row.counts.get(bp).copied().unwrap_or(0))),
        );
        trend.row(cells);
    }

    let mut split = Section::new(
        "Mobile vs Desktop Comparison",
        ["Issue Type", "Mobile", "Desktop"],
    );
    for row in &responsive.device_split {
        split.row(vec![row.label.clone(), row.mobile.to_string(), row.desktop.to_string()]);
    }

    vec![matrix, summary, by_bp, totals, heatmap, trend, split]
}

fn heat_label(count: usize, band: Option<SeverityBand>) -> String {
    match band {
        Some(band) => format!("{count} ({})", band.as_str()),
        None => String::new(),
    }
}

fn detailed_section(report: &Report) -> Section {
    let table = &report.detailed;
    let mut section = Section::new(
        "Detailed Results",
        std::iter::once("Field".to_string()).chain(table.columns.iter().map(DetailedColumn::label)),
    );
    for row in &table.rows {
        let mut cells = vec![row.key.clone()];
        cells.extend(row.cells.iter().map(|cell| cell.clone().unwrap_or_default()));
        section.row(cells);
    }
    section
}
