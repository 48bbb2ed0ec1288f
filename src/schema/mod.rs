//! Shape discovery and flattening of nested test records.

pub mod flatten;
pub mod structure;

pub use flatten::{flatten, FlattenedRow};
pub use structure::{record_structure, value_type_name, StructureInventory};
