//! Issue counting across page results.

pub mod aggregator;

pub use aggregator::{
    issues_by_page, issues_by_site, issues_by_type_list, multiplicity, page_issues, summarize,
    ReportSummary,
};
