//! Page × breakpoint × test matrix.
//!
//! Discovery unions every responsive test type seen under any page's
//! `breakpoint_results.*.tests.responsive.tests`; materialization then emits
//! one row per declared breakpoint per discovered type, so a type missing
//! from a breakpoint's tree is reported as `Not Tested` rather than `Pass`.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

use crate::model::lenient::scalar_to_string;
use crate::model::page::responsive_tests_of;
use crate::model::{split_domain_page, Breakpoint, PageResult};
use crate::observability::set_current_page;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatrixStatus {
    IssuesFound,
    Pass,
    NotTested,
}

impl MatrixStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IssuesFound => "Issues Found",
            Self::Pass => "Pass",
            Self::NotTested => "Not Tested",
        }
    }
}

impl std::fmt::Display for MatrixStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MatrixStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixRow {
    pub domain: String,
    pub page: String,
    pub breakpoint: Breakpoint,
    pub test: String,
    pub status: MatrixStatus,
    /// `None` when the test did not run at this breakpoint.
    pub issue_count: Option<usize>,
    pub issue_details: String,
}

/// Union of responsive test types across all pages and breakpoints.
pub fn discover_test_types(pages: &[PageResult]) -> BTreeSet<String> {
    pages
        .iter()
        .filter_map(PageResult::responsive)
        .flat_map(|block| {
            block
                .breakpoint_results()
                .into_values()
                .filter_map(responsive_tests_of)
                .flat_map(|tests| tests.keys().cloned())
                .collect::<Vec<_>>()
        })
        .collect()
}

/// The `issues` list of one responsive test result; empty when absent.
pub fn issue_list(test_data: &Value) -> &[Value] {
    test_data
        .get("issues")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// `"<element> <id>: <details> (<severity>)"`, with the element part trimmed.
pub fn describe_issue(issue: &Value) -> String {
    let field = |key: &str| issue.get(key).map(scalar_to_string).unwrap_or_default();
    let element = format!("{} {}", field("element"), field("id"));
    format!(
        "{}: {} ({})",
        element.trim(),
        field("details"),
        field("severity")
    )
}

/// Up to `limit` issue descriptions, one per line, with a note counting the
/// rest.
pub fn summarize_issue_details(issues: &[Value], limit: usize) -> String {
    let mut lines: Vec<String> = issues.iter().take(limit).map(describe_issue).collect();
    if issues.len() > limit {
        lines.push(format!("...and {} more", issues.len() - limit));
    }
    lines.join("\n")
}

/// Build the matrix for every page with a `responsive_testing` block, sorted
/// by domain, page, breakpoint (numerically) and test.
pub fn pivot(pages: &[PageResult], max_issue_details: usize) -> Vec<MatrixRow> {
    let test_types = discover_test_types(pages);
    let mut rows = Vec::new();
    for page in pages {
        let Some(block) = page.responsive() else {
            continue;
        };
        let _page = set_current_page(page.url());
        let (domain, path) = split_domain_page(page.url());
        for breakpoint in block.breakpoints() {
            let tests = block.responsive_tests(breakpoint);
            rows.extend(test_types.iter().map(|test| {
                let (status, issue_count, issue_details) =
                    cell(tests, test, max_issue_details);
                MatrixRow {
                    domain: domain.clone(),
                    page: path.clone(),
                    breakpoint,
                    test: test.clone(),
                    status,
                    issue_count,
                    issue_details,
                }
            }));
        }
    }
    rows.sort_by(|a, b| {
        (&a.domain, &a.page, a.breakpoint, &a.test).cmp(&(&b.domain, &b.page, b.breakpoint, &b.test))
    });
    rows
}

fn cell(
    tests: Option<&Map<String, Value>>,
    test: &str,
    max_issue_details: usize,
) -> (MatrixStatus, Option<usize>, String) {
    match tests.and_then(|tests| tests.get(test)) {
        None => (MatrixStatus::NotTested, None, "-".to_string()),
        Some(data) => {
            let issues = issue_list(data);
            if issues.is_empty() {
                (MatrixStatus::Pass, Some(0), "No issues detected".to_string())
            } else {
                (
                    MatrixStatus::IssuesFound,
                    Some(issues.len()),
                    summarize_issue_details(issues, max_issue_details),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn responsive_page(url: &str, breakpoints: Value, results: Value) -> PageResult {
        PageResult::from_value(json!({
            "url": url,
            "results": {"accessibility": {
                "tests": {},
                "responsive_testing": {"breakpoints": breakpoints, "breakpoint_results": results}
            }}
        }))
    }

    fn at(tests: Value) -> Value {
        json!({"tests": {"responsive": {"tests": tests}}})
    }

    #[test]
    fn test_absent_test_type_is_not_tested() {
        let page = responsive_page(
            "https://example.com/shop",
            json!([320, 768, 1024]),
            json!({
                "320": at(json!({
                    "overflow": {"issues": [{"element": "div", "id": "#hero", "details": "wide", "severity": "high"}]},
                    "touchTargets": {"issues": []}
                })),
                "768": at(json!({"overflow": {"issues": []}}))
            }),
        );
        let rows = pivot(&[page], 3);
        assert_eq!(rows.len(), 6);
        let summary: Vec<_> = rows
            .iter()
            .map(|r| (r.breakpoint, r.test.as_str(), r.status, r.issue_count))
            .collect();
        assert_eq!(
            summary,
            vec![
                (320, "overflow", MatrixStatus::IssuesFound, Some(1)),
                (320, "touchTargets", MatrixStatus::Pass, Some(0)),
                (768, "overflow", MatrixStatus::Pass, Some(0)),
                (768, "touchTargets", MatrixStatus::NotTested, None),
                (1024, "overflow", MatrixStatus::NotTested, None),
                (1024, "touchTargets", MatrixStatus::NotTested, None),
            ]
        );
        assert_eq!(rows[0].domain, "example.com");
        assert_eq!(rows[0].page, "shop");
        assert_eq!(rows[0].issue_details, "div #hero: wide (high)");
    }

    #[test]
    fn test_breakpoints_sort_numerically() {
        let page = responsive_page(
            "https://a.test",
            json!([1024, 320, 40]),
            json!({"40": at(json!({"overflow": {}}))}),
        );
        let order: Vec<_> = pivot(&[page], 3).iter().map(|r| r.breakpoint).collect();
        assert_eq!(order, vec![40, 320, 1024]);
    }

    #[test]
    fn test_issue_details_truncate() {
        let issues: Vec<Value> = (0..5)
            .map(|i| json!({"element": "button", "details": format!("small {i}"), "severity": "medium"}))
            .collect();
        let text = summarize_issue_details(&issues, 3);
        assert_eq!(
            text,
            "button: small 0 (medium)\nbutton: small 1 (medium)\nbutton: small 2 (medium)\n...and 2 more"
        );
    }

    #[test]
    fn test_describe_issue_with_missing_fields() {
        assert_eq!(describe_issue(&json!({})), ": ()");
        assert_eq!(describe_issue(&json!({"id": "#nav"})), "#nav: ()");
    }

    #[test]
    fn test_pages_without_responsive_block_emit_nothing() {
        let page = PageResult::from_value(json!({"url": "u", "results": {"accessibility": {"tests": {}}}}));
        assert!(pivot(&[page], 3).is_empty());
    }
}
