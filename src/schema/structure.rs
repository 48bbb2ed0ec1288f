//! Schema discovery across observed test records.
//!
//! Only the first element of a list is inspected, so the inventory is a
//! sample of the shapes seen, not a complete schema. It is used for
//! diagnostics and never feeds the aggregate tables.

use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

use super::flatten::join_path;
use crate::model::PageResult;

/// Type name shown next to each recorded path.
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Object(_) => "object",
        Value::Array(_) => "array",
        Value::String(_) => "string",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::Bool(_) => "boolean",
        Value::Null => "null",
    }
}

/// Add `"<path> (<type>)"` for every object key reachable from `value`.
///
/// Keys of the first element of a non-empty list are recorded under
/// `<path>[]` when that element is an object.
pub fn record_structure(paths: &mut BTreeSet<String>, value: &Value, path: &str) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let child_path = join_path(path, key);
                paths.insert(format!("{child_path} ({})", value_type_name(child)));
                record_structure(paths, child, &child_path);
            }
        }
        Value::Array(items) => {
            if let Some(first @ Value::Object(_)) = items.first() {
                record_structure(paths, first, &format!("{path}[]"));
            }
        }
        _ => {}
    }
}

/// Recorded paths and the first observed record, per test id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StructureInventory {
    pub structures: BTreeMap<String, BTreeSet<String>>,
    pub examples: BTreeMap<String, Value>,
}

impl StructureInventory {
    pub fn from_pages(pages: &[PageResult]) -> Self {
        let mut inventory = Self::default();
        for page in pages {
            inventory.observe(page);
        }
        inventory
    }

    /// Record every object-valued test of `page`. Pages without a tests map
    /// are ignored.
    pub fn observe(&mut self, page: &PageResult) {
        let Ok(entries) = page.test_entries() else {
            return;
        };
        for entry in entries.filter(|entry| entry.raw.is_object()) {
            record_structure(
                self.structures.entry(entry.test_id.to_string()).or_default(),
                entry.raw,
                "",
            );
            self.examples
                .entry(entry.test_id.to_string())
                .or_insert_with(|| entry.raw.clone());
        }
    }
}
