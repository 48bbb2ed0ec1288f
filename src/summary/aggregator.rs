//! Flag walking and issue rollups.
//!
//! Every rollup here walks pages identically: for each test record exposing
//! `pageFlags`, each flag that is boolean `true` and issue-prefixed counts as
//! one issue occurrence, labeled through the documentation resolver. Its
//! multiplicity comes from the first qualifying detail counter, or 1.
//!
//! Counters saturate at `usize::MAX`.
//!
//! Pages missing `results.accessibility.tests` are skipped and contribute
//! nothing. Only non-recoverable errors propagate.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::docs::DocumentationResolver;
use crate::errors::Result;
use crate::model::{site_origin, IssueEntry, IssueTypeCount, PageResult, ScopedIssue};
use crate::observability::set_current_page;

/// Completion timestamp format, local time.
const COMPLETION_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub total_pages: usize,
    /// Pages whose `tests` mapping is non-empty, whether or not any flag is
    /// raised.
    pub pages_with_issues: usize,
    pub total_issues: usize,
    pub issues_by_type: BTreeMap<String, usize>,
    pub completion_time: String,
}

/// Issue count contributed by one raised flag: the length of the first
/// non-empty list or the value of the first positive integer among the
/// detail counters, in document order; 1 when none qualifies.
pub fn multiplicity(details: Option<&Map<String, Value>>) -> usize {
    details
        .into_iter()
        .flat_map(|details| details.values())
        .find_map(|value| match value {
            Value::Array(items) if !items.is_empty() => Some(items.len()),
            Value::Number(n) => n
                .as_u64()
                .filter(|&n| n > 0)
                .and_then(|n| usize::try_from(n).ok()),
            _ => None,
        })
        .unwrap_or(1)
}

/// `(label, count)` for every raised issue flag on `page`, in document
/// order.
///
/// # Errors
///
/// Returns [`crate::errors::ReportError::MalformedRecord`] when the page has
/// no tests mapping.
pub fn page_issues(
    page: &PageResult,
    resolver: &DocumentationResolver,
) -> Result<Vec<(String, usize)>> {
    let prefix = resolver.issue_prefix();
    let mut issues = Vec::new();
    for entry in page.test_entries()? {
        let Some(record) = entry.record() else {
            continue;
        };
        let Some(flags) = record.page_flags() else {
            continue;
        };
        let count = multiplicity(record.details());
        for (flag_name, value) in flags {
            if value.as_bool() == Some(true) && flag_name.starts_with(prefix) {
                let label = resolver.resolve_issue_label(entry.test_id, flag_name)?;
                issues.push((label, count));
            }
        }
    }
    Ok(issues)
}

/// Walk every page, skipping malformed ones.
fn for_each_page_issues<F>(
    pages: &[PageResult],
    resolver: &DocumentationResolver,
    mut visit: F,
) -> Result<()>
where
    F: FnMut(&PageResult, Vec<(String, usize)>),
{
    for page in pages {
        let _page = set_current_page(page.url());
        match page_issues(page, resolver) {
            Ok(issues) => visit(page, issues),
            Err(e) if e.is_recoverable() => {
                debug!(url = page.url(), error = %e, "skipping page");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Global issue totals.
pub fn summarize(pages: &[PageResult], resolver: &DocumentationResolver) -> Result<ReportSummary> {
    let mut issues_by_type: BTreeMap<String, usize> = BTreeMap::new();
    let mut total_issues: usize = 0;
    for_each_page_issues(pages, resolver, |_, issues| {
        for (label, count) in issues {
            total_issues = total_issues.saturating_add(count);
            let entry = issues_by_type.entry(label).or_default();
            *entry = entry.saturating_add(count);
        }
    })?;

    Ok(ReportSummary {
        total_pages: pages.len(),
        pages_with_issues: pages.iter().filter(|page| page.has_tests()).count(),
        total_issues,
        issues_by_type,
        completion_time: chrono::Local::now()
            .format(COMPLETION_TIME_FORMAT)
            .to_string(),
    })
}

/// Issue types by descending count, ties broken by name.
pub fn issues_by_type_list(summary: &ReportSummary) -> Vec<IssueTypeCount> {
    let mut list: Vec<_> = summary
        .issues_by_type
        .iter()
        .map(|(issue_type, &count)| IssueTypeCount {
            issue_type: issue_type.clone(),
            count,
        })
        .collect();
    list.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.issue_type.cmp(&b.issue_type)));
    list
}

/// Issue totals per page URL, sorted by URL then issue type.
pub fn issues_by_page(
    pages: &[PageResult],
    resolver: &DocumentationResolver,
) -> Result<Vec<ScopedIssue>> {
    let mut by_page: BTreeMap<(String, String), usize> = BTreeMap::new();
    for_each_page_issues(pages, resolver, |page, issues| {
        for (label, count) in issues {
            let entry = by_page.entry((page.url().to_string(), label)).or_default();
            *entry = entry.saturating_add(count);
        }
    })?;

    Ok(by_page
        .into_iter()
        .map(|((url, issue_type), count)| {
            ScopedIssue::new(
                url,
                IssueEntry {
                    issue_type,
                    count,
                    pages_affected: 1,
                },
            )
            .with_count_details()
        })
        .collect())
}

/// Issue totals per site origin; `pages_affected` counts distinct URLs.
pub fn issues_by_site(
    pages: &[PageResult],
    resolver: &DocumentationResolver,
) -> Result<Vec<ScopedIssue>> {
    let mut by_site: BTreeMap<(String, String), (usize, BTreeSet<String>)> = BTreeMap::new();
    for_each_page_issues(pages, resolver, |page, issues| {
        let site = site_origin(page.url());
        for (label, count) in issues {
            let (total, urls) = by_site.entry((site.clone(), label)).or_default();
            *total = total.saturating_add(count);
            urls.insert(page.url().to_string());
        }
    })?;

    Ok(by_site
        .into_iter()
        .map(|((site, issue_type), (count, urls))| {
            ScopedIssue::new(
                site,
                IssueEntry {
                    issue_type,
                    count,
                    pages_affected: urls.len(),
                },
            )
        })
        .collect())
}
