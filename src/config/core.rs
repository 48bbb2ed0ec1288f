use serde::{Deserialize, Serialize};

use crate::errors::{ReportError, Result};
use crate::model::Breakpoint;
use crate::output::OutputFormat;

/// Root configuration for report generation, read from `.a11y-report.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Marker that issue flags start with.
    pub issue_prefix: String,

    /// Widest breakpoint (px) counted as mobile.
    pub mobile_max_width: Breakpoint,

    /// Issue descriptions kept per breakpoint matrix cell.
    pub max_issue_details: usize,

    /// Issue descriptions kept per responsive cell of the detailed table.
    pub detailed_summary_details: usize,

    /// Add `<url> @ <bp>px` columns to the detailed table.
    pub breakpoint_columns: bool,

    pub output: OutputConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            issue_prefix: "has".to_string(),
            mobile_max_width: 768,
            max_issue_details: 3,
            detailed_summary_details: 2,
            breakpoint_columns: true,
            output: OutputConfig::default(),
        }
    }
}

impl ReportConfig {
    /// Reject values no report can be built with.
    pub fn validate(&self) -> Result<()> {
        if self.issue_prefix.is_empty() {
            return Err(ReportError::config("issue_prefix must not be empty", None));
        }
        Ok(())
    }

    pub fn default_format(&self) -> OutputFormat {
        self.output.default_format.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub default_format: Option<OutputFormat>,
}
