//! Cross-tabulations over breakpoint results.
//!
//! Everything except the consolidated totals is derived from the per-test
//! issue lists under `breakpoint_results`, walked once into
//! [`Observation`]s. The consolidated figures come from the page's own
//! `consolidated.summary` counters and are reported as-is.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

use super::pivot::issue_list;
use crate::model::page::responsive_tests_of;
use crate::model::{split_domain_page, Breakpoint, IssueTypeCount, PageResult};

/// Issues one responsive test reported for one page at one breakpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub url: String,
    pub domain: String,
    pub breakpoint: Breakpoint,
    pub test: String,
    pub issues: usize,
}

/// Walk every page's breakpoint results, including breakpoints that are not
/// in its declared list.
pub fn observations(pages: &[PageResult]) -> Vec<Observation> {
    let mut out = Vec::new();
    for page in pages {
        let Some(block) = page.responsive() else {
            continue;
        };
        let (domain, _) = split_domain_page(page.url());
        for (breakpoint, result) in block.breakpoint_results() {
            let Some(tests) = responsive_tests_of(result) else {
                continue;
            };
            out.extend(tests.iter().map(|(test, data)| Observation {
                url: page.url().to_string(),
                domain: domain.clone(),
                breakpoint,
                test: test.clone(),
                issues: issue_list(data).len(),
            }));
        }
    }
    out
}

/// Display label for a responsive test id.
pub fn test_type_label(test: &str) -> &str {
    match test {
        "overflow" => "Content Overflow",
        "touchTargets" => "Touch Targets",
        "fontScaling" => "Font Scaling",
        "fixedPosition" => "Fixed Position",
        "contentStacking" => "Content Stacking",
        other => other,
    }
}

/// Heatmap band for a domain/breakpoint issue count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum SeverityBand {
    Low,
    Medium,
    #[serde(rename = "Medium-High")]
    MediumHigh,
    High,
}

impl SeverityBand {
    /// `None` for zero.
    pub fn for_count(count: usize) -> Option<Self> {
        match count {
            0 => None,
            1..=2 => Some(Self::Low),
            3..=5 => Some(Self::Medium),
            6..=10 => Some(Self::MediumHigh),
            _ => Some(Self::High),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::MediumHigh => "Medium-High",
            Self::High => "High",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendRow {
    pub test: String,
    pub label: String,
    pub counts: BTreeMap<Breakpoint, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSplitRow {
    pub test: String,
    pub label: String,
    pub mobile: usize,
    pub desktop: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapCell {
    pub count: usize,
    pub band: Option<SeverityBand>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapRow {
    pub domain: String,
    pub cells: BTreeMap<Breakpoint, HeatmapCell>,
}

/// A row of the breakpoint summary: one `Page` row per URL with a
/// `consolidated` block, followed by a `Breakpoint` row for each of its
/// breakpoints that reported issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BreakpointSummaryRow {
    #[serde(rename_all = "camelCase")]
    Page {
        url: String,
        breakpoints_tested: usize,
        affected_breakpoints: usize,
        total_issues: usize,
        overflow_issues: usize,
        touch_target_issues: usize,
        font_scaling_issues: usize,
        fixed_position_issues: usize,
        content_stacking_issues: usize,
        tested: String,
    },
    #[serde(rename_all = "camelCase")]
    Breakpoint {
        url: String,
        breakpoint: Breakpoint,
        total_issues: usize,
        details: String,
    },
}

/// Consolidated counter keys and the issue-type name they total into.
const CONSOLIDATED_TYPES: [(&str, &str); 5] = [
    ("overflowIssues", "Overflow"),
    ("touchTargetIssues", "Touch Target"),
    ("fontScalingIssues", "Font Scaling"),
    ("fixedPositionIssues", "Fixed Position"),
    ("contentStackingIssues", "Content Stacking"),
];

fn counter(summary: Option<&Map<String, Value>>, key: &str) -> usize {
    summary
        .and_then(|summary| summary.get(key))
        .and_then(Value::as_u64)
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0)
}

/// All derived responsive tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsiveRollups {
    /// Union of declared and observed breakpoints, ascending.
    pub breakpoints: Vec<Breakpoint>,
    pub issues_by_breakpoint: BTreeMap<Breakpoint, usize>,
    pub trend: Vec<TrendRow>,
    pub device_split: Vec<DeviceSplitRow>,
    pub heatmap: Vec<HeatmapRow>,
    pub breakpoint_summary: Vec<BreakpointSummaryRow>,
    pub consolidated_totals: Vec<IssueTypeCount>,
}

impl ResponsiveRollups {
    pub fn from_pages(pages: &[PageResult], mobile_max_width: Breakpoint) -> Self {
        let observed = observations(pages);
        let breakpoints: BTreeSet<Breakpoint> = pages
            .iter()
            .filter_map(PageResult::responsive)
            .flat_map(|block| block.breakpoints())
            .chain(observed.iter().map(|o| o.breakpoint))
            .collect();

        Self {
            breakpoints: breakpoints.into_iter().collect(),
            issues_by_breakpoint: issues_by_breakpoint(&observed),
            trend: trend(&observed),
            device_split: device_split(&observed, mobile_max_width),
            heatmap: heatmap(&observed),
            breakpoint_summary: breakpoint_summary(pages),
            consolidated_totals: consolidated_totals(pages),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.breakpoints.is_empty() && self.breakpoint_summary.is_empty()
    }
}

/// Total issues at each breakpoint, summed over pages and tests.
pub fn issues_by_breakpoint(observed: &[Observation]) -> BTreeMap<Breakpoint, usize> {
    let mut totals = BTreeMap::new();
    for o in observed.iter().filter(|o| o.issues > 0) {
        *totals.entry(o.breakpoint).or_default() += o.issues;
    }
    totals
}

/// Issue counts per test type per breakpoint, one row per observed type.
pub fn trend(observed: &[Observation]) -> Vec<TrendRow> {
    let mut by_test: BTreeMap<&str, BTreeMap<Breakpoint, usize>> = BTreeMap::new();
    for o in observed {
        let counts = by_test.entry(o.test.as_str()).or_default();
        if o.issues > 0 {
            *counts.entry(o.breakpoint).or_default() += o.issues;
        }
    }
    by_test
        .into_iter()
        .map(|(test, counts)| TrendRow {
            test: test.to_string(),
            label: test_type_label(test).to_string(),
            counts,
        })
        .collect()
}

/// Per-type issue totals split at `mobile_max_width` (inclusive is mobile).
pub fn device_split(observed: &[Observation], mobile_max_width: Breakpoint) -> Vec<DeviceSplitRow> {
    trend(observed)
        .into_iter()
        .map(|row| {
            let (mobile, desktop) = row.counts.iter().fold((0, 0), |(m, d), (&bp, &n)| {
                if bp <= mobile_max_width {
                    (m + n, d)
                } else {
                    (m, d + n)
                }
            });
            DeviceSplitRow {
                test: row.test,
                label: row.label,
                mobile,
                desktop,
            }
        })
        .collect()
}

/// Domain × breakpoint issue counts for domains with at least one issue.
pub fn heatmap(observed: &[Observation]) -> Vec<HeatmapRow> {
    let mut by_domain: BTreeMap<&str, BTreeMap<Breakpoint, usize>> = BTreeMap::new();
    for o in observed.iter().filter(|o| o.issues > 0) {
        *by_domain
            .entry(o.domain.as_str())
            .or_default()
            .entry(o.breakpoint)
            .or_default() += o.issues;
    }
    by_domain
        .into_iter()
        .map(|(domain, counts)| HeatmapRow {
            domain: domain.to_string(),
            cells: counts
                .into_iter()
                .map(|(bp, count)| {
                    (
                        bp,
                        HeatmapCell {
                            count,
                            band: SeverityBand::for_count(count),
                        },
                    )
                })
                .collect(),
        })
        .collect()
}

/// Per-page consolidated figures with per-breakpoint sub-rows, in page
/// order.
pub fn breakpoint_summary(pages: &[PageResult]) -> Vec<BreakpointSummaryRow> {
    let mut rows = Vec::new();
    for page in pages {
        let Some(block) = page.responsive() else {
            continue;
        };
        if !block.has_consolidated() {
            continue;
        }
        let summary = block.consolidated_summary();
        let mut declared = block.breakpoints();
        declared.sort_unstable();
        rows.push(BreakpointSummaryRow::Page {
            url: page.url().to_string(),
            breakpoints_tested: declared.len(),
            affected_breakpoints: counter(summary, "affectedBreakpoints"),
            total_issues: counter(summary, "totalIssues"),
            overflow_issues: counter(summary, "overflowIssues"),
            touch_target_issues: counter(summary, "touchTargetIssues"),
            font_scaling_issues: counter(summary, "fontScalingIssues"),
            fixed_position_issues: counter(summary, "fixedPositionIssues"),
            content_stacking_issues: counter(summary, "contentStackingIssues"),
            tested: declared
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        });

        for (breakpoint, result) in block.breakpoint_results() {
            let Some(tests) = responsive_tests_of(result) else {
                continue;
            };
            let counts: Vec<(&str, usize)> = tests
                .iter()
                .map(|(test, data)| (test.as_str(), issue_list(data).len()))
                .filter(|&(_, n)| n > 0)
                .collect();
            let total_issues: usize = counts.iter().map(|&(_, n)| n).sum();
            if total_issues == 0 {
                continue;
            }
            rows.push(BreakpointSummaryRow::Breakpoint {
                url: page.url().to_string(),
                breakpoint,
                total_issues,
                details: counts
                    .iter()
                    .map(|(test, n)| format!("{test}: {n}"))
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }
    }
    rows
}

/// The five consolidated issue types summed over all pages.
pub fn consolidated_totals(pages: &[PageResult]) -> Vec<IssueTypeCount> {
    let summaries: Vec<_> = pages
        .iter()
        .filter_map(PageResult::responsive)
        .filter_map(|block| block.consolidated_summary())
        .collect();
    CONSOLIDATED_TYPES
        .iter()
        .map(|&(key, issue_type)| IssueTypeCount {
            issue_type: issue_type.to_string(),
            count: summaries
                .iter()
                .map(|s| counter(Some(s), key))
                .fold(0, usize::saturating_add),
        })
        .collect()
}
