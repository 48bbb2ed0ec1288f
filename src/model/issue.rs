use serde::{Deserialize, Serialize};

/// Occurrences of one issue type, derived per report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueEntry {
    pub issue_type: String,
    pub count: usize,
    pub pages_affected: usize,
}

/// An [`IssueEntry`] attributed to a page URL or a site origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopedIssue {
    pub scope: String,
    pub issue_type: String,
    pub count: usize,
    pub pages_affected: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ScopedIssue {
    pub fn new(scope: impl Into<String>, entry: IssueEntry) -> Self {
        Self {
            scope: scope.into(),
            issue_type: entry.issue_type,
            count: entry.count,
            pages_affected: entry.pages_affected,
            details: None,
        }
    }

    /// Attach the `"Found <n> issue(s)"` text shown next to per-URL rows.
    #[must_use]
    pub fn with_count_details(mut self) -> Self {
        self.details = Some(format!("Found {} issue(s)", self.count));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueTypeCount {
    pub issue_type: String,
    pub count: usize,
}
