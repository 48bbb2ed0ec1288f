//! Detailed results: one row per flattened field path, one column per page
//! URL and, optionally, per URL at each breakpoint.

use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};

use crate::model::page::responsive_tests_of;
use crate::model::{Breakpoint, PageResult};
use crate::responsive::{describe_issue, issue_list};
use crate::schema::flatten::{flatten, render_leaf};

/// A page URL, or a page URL at one breakpoint. Orders by URL with the bare
/// URL first and breakpoints ascending.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DetailedColumn {
    pub url: String,
    pub breakpoint: Option<Breakpoint>,
}

impl DetailedColumn {
    pub fn label(&self) -> String {
        match self.breakpoint {
            Some(bp) => format!("{} @ {bp}px", self.url),
            None => self.url.clone(),
        }
    }
}

impl Serialize for DetailedColumn {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailedRow {
    pub key: String,
    /// Aligned with [`DetailedTable::columns`].
    pub cells: Vec<Option<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetailedTable {
    pub columns: Vec<DetailedColumn>,
    pub rows: Vec<DetailedRow>,
}

impl DetailedTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cell(&self, key: &str, column: &str) -> Option<&str> {
        let index = self.columns.iter().position(|c| c.label() == column)?;
        self.rows
            .iter()
            .find(|row| row.key == key)?
            .cells
            .get(index)?
            .as_deref()
    }
}

#[derive(Default)]
struct Builder {
    cells: BTreeMap<String, BTreeMap<DetailedColumn, String>>,
}

impl Builder {
    fn set(&mut self, key: String, column: &DetailedColumn, value: String) {
        self.cells
            .entry(key)
            .or_default()
            .insert(column.clone(), value);
    }

    fn finish(self) -> DetailedTable {
        let columns: Vec<DetailedColumn> = self
            .cells
            .values()
            .flat_map(|cells| cells.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let rows = self
            .cells
            .into_iter()
            .map(|(key, mut cells)| DetailedRow {
                key,
                cells: columns.iter().map(|column| cells.remove(column)).collect(),
            })
            .collect();
        DetailedTable { columns, rows }
    }
}

/// `"<n> issue(s): <d1>; <d2>"` with `" and <k> more"` past `limit`, or
/// `"No issues"`.
pub fn responsive_cell(issues: &[serde_json::Value], limit: usize) -> String {
    if issues.is_empty() {
        return "No issues".to_string();
    }
    let details: Vec<String> = issues.iter().take(limit).map(describe_issue).collect();
    let mut text = format!("{} issue(s): {}", issues.len(), details.join("; "));
    if issues.len() > limit {
        text.push_str(&format!(" and {} more", issues.len() - limit));
    }
    text
}

/// Build the detailed table.
///
/// Breakpoint columns are only produced when `breakpoint_columns` is set,
/// and only for breakpoints some page declares.
pub fn detailed_results(
    pages: &[PageResult],
    breakpoint_columns: bool,
    summary_details: usize,
) -> DetailedTable {
    let declared: BTreeSet<Breakpoint> = pages
        .iter()
        .filter_map(PageResult::responsive)
        .flat_map(|block| block.breakpoints())
        .collect();

    let mut builder = Builder::default();
    for page in pages {
        let base = DetailedColumn {
            url: page.url().to_string(),
            breakpoint: None,
        };

        if let Ok(entries) = page.test_entries() {
            for entry in entries {
                if entry.raw.is_object() {
                    for (key, value) in flatten(entry.raw, entry.test_id) {
                        builder.set(key, &base, value);
                    }
                } else {
                    builder.set(entry.test_id.to_string(), &base, render_leaf(entry.raw));
                }
            }
        }

        let Some(block) = page.responsive() else {
            continue;
        };
        if block.declares_breakpoints() {
            let listed: Vec<String> = block.breakpoints().iter().map(ToString::to_string).collect();
            builder.set(
                "responsive_testing.breakpoints_tested".to_string(),
                &base,
                format!("[{}]", listed.join(", ")),
            );
        }
        if let Some(summary) = block.consolidated_summary() {
            for (key, value) in summary {
                builder.set(
                    format!("responsive_testing.summary.{key}"),
                    &base,
                    render_leaf(value),
                );
            }
        }
        if !breakpoint_columns {
            continue;
        }
        for (breakpoint, result) in block.breakpoint_results() {
            if !declared.contains(&breakpoint) {
                continue;
            }
            let Some(tests) = responsive_tests_of(result) else {
                continue;
            };
            let column = DetailedColumn {
                url: page.url().to_string(),
                breakpoint: Some(breakpoint),
            };
            for (test, data) in tests {
                builder.set(
                    format!("responsive.{test}"),
                    &column,
                    responsive_cell(issue_list(data), summary_details),
                );
            }
        }
    }
    builder.finish()
}
