//! Documentation lookup and issue labeling.

pub mod label;
pub mod resolver;
pub mod table;

pub use label::{flag_text, format_test_name, issue_type, split_camel_case, title_case};
pub use resolver::{DocumentationResolver, DocumentationSource};
pub use table::{documentation_table, DocumentationRow, DocumentationRowKind};
