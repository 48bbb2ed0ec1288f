// Export modules for library usage
pub mod cli;
pub mod config;
pub mod detailed;
pub mod docs;
pub mod errors;
pub mod io;
pub mod model;
pub mod observability;
pub mod output;
pub mod report;
pub mod responsive;
pub mod schema;
pub mod summary;

// Re-export commonly used types
pub use crate::config::{load_config, resolve_config, ReportConfig};
pub use crate::docs::{DocumentationResolver, DocumentationSource};
pub use crate::errors::{ReportError, Result};
pub use crate::io::{load_pages, load_runs, read_documents};
pub use crate::model::{DocumentationRecord, PageResult, ScopedIssue};
pub use crate::output::{write_report, OutputFormat, ReportWriter};
pub use crate::report::{build_report, build_resolver, Report};
pub use crate::schema::{flatten, record_structure, FlattenedRow, StructureInventory};
pub use crate::summary::{summarize, ReportSummary};
