//! Loading page-result and test-run documents from disk.

pub mod documents;

pub use documents::{filter_runs, load_pages, load_runs, parse_documents, read_documents};
