//! Documentation lookup keyed by test identifier.
//!
//! Documentation is authored separately from page results and turns up in
//! several places: a run-level `documentation` mapping, a `documentation`
//! field embedded in a test's output, or the same field one level down in
//! the test's same-named inner object. The resolver is built once per report
//! by registering every source in a fixed order; the first record found for
//! a normalized test id wins and later ones are ignored.

use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::{debug, trace, warn};

use super::label::{flag_text, format_test_name, issue_type};
use crate::errors::Result;
use crate::model::{DocumentationRecord, PageResult, TestEntry};

/// A container that may carry documentation.
#[derive(Debug, Clone, Copy)]
pub enum DocumentationSource<'a> {
    /// A test-run document with a top-level `documentation` mapping and/or a
    /// `tests` mapping whose entries embed `documentation`.
    TestRun(&'a Value),
    /// A page result whose tests embed `documentation`.
    Page(&'a PageResult),
}

#[derive(Debug, Clone)]
pub struct DocumentationResolver {
    issue_prefix: String,
    /// Case and `-`/`_` variants, pointing into `records`. All variants of
    /// one record share its normalized key, so no two records share a key.
    keys: HashMap<String, usize>,
    /// Separator-free spellings, first registration wins.
    stripped: HashMap<String, usize>,
    /// First-registered `(test_id, record)` pairs in registration order.
    records: Vec<(String, DocumentationRecord)>,
}

impl DocumentationResolver {
    pub fn new(issue_prefix: impl Into<String>) -> Self {
        Self {
            issue_prefix: issue_prefix.into(),
            keys: HashMap::new(),
            stripped: HashMap::new(),
            records: Vec::new(),
        }
    }

    pub fn issue_prefix(&self) -> &str {
        &self.issue_prefix
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Registered records in the order they were first found.
    pub fn records(&self) -> impl Iterator<Item = (&str, &DocumentationRecord)> {
        self.records.iter().map(|(id, doc)| (id.as_str(), doc))
    }

    /// Extract and register every documentation record in `source`.
    /// Returns how many new test ids were added.
    pub fn register_source(&mut self, source: DocumentationSource<'_>) -> usize {
        match source {
            DocumentationSource::TestRun(run) => self.register_test_run(run),
            DocumentationSource::Page(page) => self.register_page(page),
        }
    }

    fn register_test_run(&mut self, run: &Value) -> usize {
        let mut added = 0;
        if let Some(documentation) = run.get("documentation").and_then(Value::as_object) {
            for (test_id, raw) in documentation {
                added += usize::from(self.register(test_id, raw));
            }
        }
        if let Some(tests) = run.get("tests").and_then(Value::as_object) {
            for (test_id, test_data) in tests {
                if let Some(raw) = test_data.get("documentation") {
                    added += usize::from(self.register(test_id, raw));
                }
            }
        }
        added
    }

    fn register_page(&mut self, page: &PageResult) -> usize {
        let entries = match page.test_entries() {
            Ok(entries) => entries,
            Err(e) => {
                debug!(url = page.url(), error = %e, "no documentation scan for page");
                return 0;
            }
        };
        let entries: Vec<_> = entries.collect();
        let mut added = 0;
        for entry in &entries {
            if let Some(raw) = direct_documentation(entry) {
                added += usize::from(self.register(entry.test_id, raw));
            }
        }
        for entry in entries.iter().filter(|e| direct_documentation(e).is_none()) {
            if let Some(raw) = any_field_documentation(entry) {
                added += usize::from(self.register(entry.test_id, raw));
            }
        }
        added
    }

    /// Decode and register one documentation payload. Malformed payloads are
    /// logged and skipped.
    pub fn register(&mut self, test_id: &str, raw: &Value) -> bool {
        if self.keys.contains_key(&normalize_key(test_id)) {
            trace!(test_id, "documentation already registered, keeping first");
            return false;
        }
        match DocumentationRecord::from_value(test_id, raw) {
            Ok(doc) => self.insert(test_id, doc),
            Err(e) => {
                warn!(test_id, error = %e, "skipping malformed documentation");
                false
            }
        }
    }

    /// Register a decoded record under `test_id` and its name variants,
    /// unless the normalized id is already taken.
    pub fn insert(&mut self, test_id: &str, doc: DocumentationRecord) -> bool {
        let normalized = normalize_key(test_id);
        if self.keys.contains_key(&normalized) {
            trace!(test_id, "documentation already registered, keeping first");
            return false;
        }
        let malformed = doc.malformed_criteria();
        if !malformed.is_empty() {
            warn!(test_id, criteria = ?malformed, "WCAG criteria not in d.d.d form");
        }
        debug!(test_id, checks = doc.tests.len(), "registered documentation");

        let index = self.records.len();
        self.records.push((test_id.to_string(), doc));
        for key in stored_variants(test_id) {
            self.keys.entry(key).or_insert(index);
        }
        self.stripped
            .entry(strip_separators(test_id))
            .or_insert(index);
        true
    }

    /// Find the record for `test_id` regardless of case or `-`/`_` choice.
    pub fn lookup(&self, test_id: &str) -> Option<&DocumentationRecord> {
        self.keys
            .get(test_id)
            .or_else(|| self.keys.get(&normalize_key(test_id)))
            .or_else(|| self.stripped.get(&strip_separators(test_id)))
            .map(|&index| &self.records[index].1)
    }

    /// Human-readable label for an issue flag raised by `test_id`.
    ///
    /// With documentation whose checks reference the flag this is
    /// `"<testName> - <check name>"`; with documentation but no matching
    /// check, `"<testName>: <Issue Type>"`; without documentation,
    /// `"<Formatted Test Name>: <Issue Type>"`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::ReportError::MissingPrefix`] when `flag_name`
    /// does not start with the issue prefix.
    pub fn resolve_issue_label(&self, test_id: &str, flag_name: &str) -> Result<String> {
        let text = flag_text(flag_name, &self.issue_prefix)?;
        let issue = issue_type(text);
        let formatted_test_name = format_test_name(test_id);

        let Some(doc) = name_variants(test_id)
            .iter()
            .find_map(|variant| self.lookup(variant))
        else {
            return Ok(format!("{formatted_test_name}: {issue}"));
        };

        let doc_name = doc
            .test_name
            .clone()
            .unwrap_or_else(|| formatted_test_name.clone());
        let patterns = [
            format!("pageFlags.{flag_name}"),
            format!("pageFlags.has{text}"),
            format!("details.{flag_name}"),
            flag_name.to_string(),
        ];
        match doc.tests.iter().find(|check| check.references_any(&patterns)) {
            Some(check) if !check.name.is_empty() => Ok(format!("{doc_name} - {}", check.name)),
            Some(_) => Ok(format!("{doc_name} - {issue}")),
            None => Ok(format!("{doc_name}: {issue}")),
        }
    }
}

/// Documentation directly on the test or on its same-named inner object.
fn direct_documentation<'a>(entry: &TestEntry<'a>) -> Option<&'a Value> {
    let fields: &Map<String, Value> = entry.raw.as_object()?;
    fields
        .get("documentation")
        .or_else(|| fields.get(entry.test_id)?.get("documentation"))
}

/// Documentation on any other object-valued field; scanned only after every
/// direct location on the page.
fn any_field_documentation<'a>(entry: &TestEntry<'a>) -> Option<&'a Value> {
    entry
        .raw
        .as_object()?
        .values()
        .filter(|value| value.is_object())
        .find_map(|value| value.get("documentation"))
}

fn normalize_key(test_id: &str) -> String {
    test_id.to_lowercase().replace('-', "_")
}

fn strip_separators(test_id: &str) -> String {
    test_id.to_lowercase().replace(['-', '_'], "")
}

/// Keys under which a record is stored.
fn stored_variants(test_id: &str) -> Vec<String> {
    let normalized = normalize_key(test_id);
    vec![
        normalized.replace('_', "-"),
        test_id.to_string(),
        test_id.to_lowercase(),
        normalized,
    ]
}

/// Names tried, in order, when resolving a label.
fn name_variants(test_id: &str) -> [String; 5] {
    [
        test_id.to_string(),
        test_id.replace('-', "_"),
        test_id.replace('_', "-"),
        test_id.to_lowercase(),
        test_id.replace(['-', '_'], ""),
    ]
}
