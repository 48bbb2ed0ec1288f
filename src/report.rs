//! Report assembly: every table built from one set of pages and test runs.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::ReportConfig;
use crate::detailed::{detailed_results, DetailedTable};
use crate::docs::{documentation_table, DocumentationResolver, DocumentationRow, DocumentationSource};
use crate::errors::Result;
use crate::model::{IssueTypeCount, PageResult, ScopedIssue};
use crate::observability::{set_phase, ReportPhase};
use crate::responsive::{pivot, MatrixRow, ResponsiveRollups};
use crate::summary::{issues_by_page, issues_by_site, issues_by_type_list, summarize, ReportSummary};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub summary: ReportSummary,
    pub issues_by_type: Vec<IssueTypeCount>,
    pub issues_by_page: Vec<ScopedIssue>,
    pub issues_by_site: Vec<ScopedIssue>,
    pub documentation: Vec<DocumentationRow>,
    pub detailed: DetailedTable,
    pub breakpoint_matrix: Vec<MatrixRow>,
    pub responsive: ResponsiveRollups,
}

/// Register documentation from test runs first, then from page results.
pub fn build_resolver(
    pages: &[PageResult],
    runs: &[Value],
    config: &ReportConfig,
) -> DocumentationResolver {
    let _phase = set_phase(ReportPhase::DocumentationScan);
    let mut resolver = DocumentationResolver::new(config.issue_prefix.clone());
    let from_runs: usize = runs
        .iter()
        .map(|run| resolver.register_source(DocumentationSource::TestRun(run)))
        .sum();
    let from_pages: usize = pages
        .iter()
        .map(|page| resolver.register_source(DocumentationSource::Page(page)))
        .sum();
    debug!(from_runs, from_pages, "documentation scan complete");
    resolver
}

/// Build the full report. Malformed pages are skipped by each table.
///
/// # Errors
///
/// Only non-recoverable errors propagate; none arise from well-formed
/// configuration.
pub fn build_report(pages: &[PageResult], runs: &[Value], config: &ReportConfig) -> Result<Report> {
    let resolver = build_resolver(pages, runs, config);

    let summary = {
        let _phase = set_phase(ReportPhase::Summary);
        summarize(pages, &resolver)?
    };
    let (by_page, by_site) = {
        let _phase = set_phase(ReportPhase::Rollups);
        (issues_by_page(pages, &resolver)?, issues_by_site(pages, &resolver)?)
    };
    let detailed = {
        let _phase = set_phase(ReportPhase::DetailedResults);
        detailed_results(pages, config.breakpoint_columns, config.detailed_summary_details)
    };
    let (breakpoint_matrix, responsive) = {
        let _phase = set_phase(ReportPhase::BreakpointPivot);
        (
            pivot(pages, config.max_issue_details),
            ResponsiveRollups::from_pages(pages, config.mobile_max_width),
        )
    };

    info!(
        pages = summary.total_pages,
        total_issues = summary.total_issues,
        documented_tests = resolver.len(),
        "report built"
    );

    Ok(Report {
        issues_by_type: issues_by_type_list(&summary),
        summary,
        issues_by_page: by_page,
        issues_by_site: by_site,
        documentation: documentation_table(&resolver),
        detailed,
        breakpoint_matrix,
        responsive,
    })
}
