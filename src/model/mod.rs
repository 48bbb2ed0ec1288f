//! Data model for page results, documentation and derived issue entries.
//!
//! Page results are loosely schematized, so they are kept as JSON and exposed
//! through borrowed views (`TestEntry`, `TestRecord`, `ResponsiveBlock`) that
//! answer "is this nested key here?" without imposing a schema.

pub mod documentation;
pub mod issue;
pub(crate) mod lenient;
pub mod page;

pub use documentation::{is_wcag_criterion, CheckRecord, DocumentationRecord, Impact};
pub use issue::{IssueEntry, IssueTypeCount, ScopedIssue};
pub use page::{
    object_id, site_origin, split_domain_page, Breakpoint, PageResult, ResponsiveBlock, TestEntry,
    TestRecord, UNKNOWN_SITE, UNKNOWN_URL,
};
