use serde_json::{Map, Value};
use std::collections::BTreeMap;
use url::Url;

use crate::errors::{ReportError, Result};

/// Placeholder used when a page document carries no `url`.
pub const UNKNOWN_URL: &str = "Unknown URL";
/// Placeholder used when a URL has no recognizable `scheme://host` part.
pub const UNKNOWN_SITE: &str = "Unknown Site";

/// Viewport width in pixels.
pub type Breakpoint = u32;

/// One analyzed page, as produced by the page-scanning process.
///
/// The document is held as-is; accessors walk the conventional
/// `results.accessibility.{tests,responsive_testing}` shape and report
/// structural absence as [`ReportError::MalformedRecord`].
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    url: String,
    document: Value,
}

impl PageResult {
    pub fn from_value(document: Value) -> Self {
        let url = document
            .get("url")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_URL)
            .to_string();
        Self { url, document }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    /// The run this page belongs to; accepts a plain string or an
    /// extended-JSON `{"$oid": "..."}` object.
    pub fn test_run_id(&self) -> Option<&str> {
        self.document.get("test_run_id").and_then(object_id)
    }

    /// `results.accessibility`
    pub fn accessibility(&self) -> Result<&Map<String, Value>> {
        let results = self
            .document
            .get("results")
            .and_then(Value::as_object)
            .ok_or_else(|| ReportError::malformed(&self.url, "results"))?;
        results
            .get("accessibility")
            .and_then(Value::as_object)
            .ok_or_else(|| ReportError::malformed(&self.url, "accessibility"))
    }

    /// `results.accessibility.tests`
    pub fn tests(&self) -> Result<&Map<String, Value>> {
        self.accessibility()?
            .get("tests")
            .and_then(Value::as_object)
            .ok_or_else(|| ReportError::malformed(&self.url, "tests"))
    }

    pub fn test_entries(&self) -> Result<impl Iterator<Item = TestEntry<'_>>> {
        Ok(self
            .tests()?
            .iter()
            .map(|(test_id, raw)| TestEntry { test_id, raw }))
    }

    /// Whether the page ran at least one test. This is what the summary
    /// counts as a page "with issues".
    pub fn has_tests(&self) -> bool {
        self.tests().map(|tests| !tests.is_empty()).unwrap_or(false)
    }

    /// `results.accessibility.responsive_testing`, if present.
    pub fn responsive(&self) -> Option<ResponsiveBlock<'_>> {
        self.accessibility()
            .ok()?
            .get("responsive_testing")
            .and_then(Value::as_object)
            .map(|raw| ResponsiveBlock { raw })
    }
}

/// One named test under `tests`.
#[derive(Debug, Clone, Copy)]
pub struct TestEntry<'a> {
    pub test_id: &'a str,
    pub raw: &'a Value,
}

impl<'a> TestEntry<'a> {
    /// The record holding this test's fields. Tests conventionally nest
    /// their output under a same-named key (`forms.forms`); when that key
    /// is absent the outer object is used directly.
    pub fn record(&self) -> Option<TestRecord<'a>> {
        let outer = self.raw.as_object()?;
        match outer.get(self.test_id).and_then(Value::as_object) {
            Some(inner) => Some(TestRecord::Nested {
                inner_id: self.test_id,
                fields: inner,
            }),
            None => Some(TestRecord::Direct(outer)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum TestRecord<'a> {
    Direct(&'a Map<String, Value>),
    Nested {
        inner_id: &'a str,
        fields: &'a Map<String, Value>,
    },
}

impl<'a> TestRecord<'a> {
    pub fn fields(&self) -> &'a Map<String, Value> {
        match self {
            Self::Direct(fields) | Self::Nested { fields, .. } => fields,
        }
    }

    pub fn page_flags(&self) -> Option<&'a Map<String, Value>> {
        self.fields().get("pageFlags").and_then(Value::as_object)
    }

    /// Detail counters for flagged issues. `pageFlags.details` is the
    /// conventional location; a `details` sibling of `pageFlags` is used
    /// when the former is absent.
    pub fn details(&self) -> Option<&'a Map<String, Value>> {
        self.page_flags()
            .and_then(|flags| flags.get("details"))
            .and_then(Value::as_object)
            .or_else(|| self.fields().get("details").and_then(Value::as_object))
    }
}

/// Borrowed view over `responsive_testing`.
#[derive(Debug, Clone, Copy)]
pub struct ResponsiveBlock<'a> {
    raw: &'a Map<String, Value>,
}

impl<'a> ResponsiveBlock<'a> {
    /// Declared breakpoints, in document order. Entries that are neither
    /// integers nor numeric strings are dropped.
    pub fn breakpoints(&self) -> Vec<Breakpoint> {
        self.raw
            .get("breakpoints")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(parse_breakpoint).collect())
            .unwrap_or_default()
    }

    pub fn declares_breakpoints(&self) -> bool {
        self.raw.contains_key("breakpoints")
    }

    /// All `breakpoint_results` entries with a numeric key, sorted by width.
    pub fn breakpoint_results(&self) -> BTreeMap<Breakpoint, &'a Value> {
        self.raw
            .get("breakpoint_results")
            .and_then(Value::as_object)
            .map(|results| {
                results
                    .iter()
                    .filter_map(|(key, value)| {
                        Some((key.trim().parse::<Breakpoint>().ok()?, value))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// `tests.responsive.tests` of one breakpoint's result tree. `None`
    /// means the breakpoint was never tested.
    pub fn responsive_tests(&self, breakpoint: Breakpoint) -> Option<&'a Map<String, Value>> {
        let result = self.breakpoint_results().get(&breakpoint).copied()?;
        responsive_tests_of(result)
    }

    /// `consolidated.summary`
    pub fn consolidated_summary(&self) -> Option<&'a Map<String, Value>> {
        self.raw
            .get("consolidated")?
            .get("summary")?
            .as_object()
    }

    pub fn has_consolidated(&self) -> bool {
        self.raw.get("consolidated").is_some_and(Value::is_object)
    }
}

/// `tests.responsive.tests` of a single breakpoint result.
pub(crate) fn responsive_tests_of(result: &Value) -> Option<&Map<String, Value>> {
    result.get("tests")?.get("responsive")?.get("tests")?.as_object()
}

/// A document identifier written as a plain string or as `{"$oid": "..."}`.
pub fn object_id(value: &Value) -> Option<&str> {
    match value {
        Value::String(id) => Some(id),
        Value::Object(obj) => obj.get("$oid").and_then(Value::as_str),
        _ => None,
    }
}

fn parse_breakpoint(value: &Value) -> Option<Breakpoint> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| Breakpoint::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// `scheme://host[:port]` of a URL, or [`UNKNOWN_SITE`] when it does not
/// parse or has no host. Scheme and host come back lower-cased and default
/// ports are dropped.
pub fn site_origin(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return UNKNOWN_SITE.to_string();
    };
    match (parsed.host_str(), parsed.port()) {
        (Some(host), Some(port)) => format!("{}://{host}:{port}", parsed.scheme()),
        (Some(host), None) => format!("{}://{host}", parsed.scheme()),
        (None, _) => UNKNOWN_SITE.to_string(),
    }
}

/// Split a URL into `(domain, page)` for the breakpoint matrix:
/// `https://a.test/x/y` becomes `("a.test", "x/y")`.
pub fn split_domain_page(url: &str) -> (String, String) {
    let stripped = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    match stripped.split_once('/') {
        Some((domain, page)) => (domain.to_string(), page.to_string()),
        None => (stripped.to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_levels_are_reported_by_name() {
        let page = PageResult::from_value(json!({"url": "https://a.test"}));
        match page.tests() {
            Err(ReportError::MalformedRecord { missing, .. }) => assert_eq!(missing, "results"),
            other => panic!("unexpected: {other:?}"),
        }

        let page = PageResult::from_value(json!({"url": "u", "results": {"accessibility": {}}}));
        match page.tests() {
            Err(ReportError::MalformedRecord { missing, .. }) => assert_eq!(missing, "tests"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_url_defaults_when_absent() {
        let page = PageResult::from_value(json!({}));
        assert_eq!(page.url(), UNKNOWN_URL);
        assert!(!page.has_tests());
    }

    #[test]
    fn test_record_prefers_same_named_inner_object() {
        let raw = json!({"forms": {"pageFlags": {"hasX": true}}, "timestamp": "t"});
        let entry = TestEntry {
            test_id: "forms",
            raw: &raw,
        };
        match entry.record() {
            Some(TestRecord::Nested { inner_id, fields }) => {
                assert_eq!(inner_id, "forms");
                assert!(fields.contains_key("pageFlags"));
            }
            other => panic!("expected nested record, got {other:?}"),
        }

        let raw = json!({"pageFlags": {"hasX": true}});
        let entry = TestEntry {
            test_id: "forms",
            raw: &raw,
        };
        assert!(matches!(entry.record(), Some(TestRecord::Direct(_))));
        assert!(entry.record().and_then(|r| r.page_flags()).is_some());
    }

    #[test]
    fn test_details_fall_back_to_sibling() {
        let raw = json!({
            "pageFlags": {"hasX": true},
            "details": {"x": [1, 2]}
        });
        let record = TestRecord::Direct(raw.as_object().unwrap());
        assert_eq!(record.details().unwrap()["x"], json!([1, 2]));

        let raw = json!({
            "pageFlags": {"hasX": true, "details": {"y": 3}},
            "details": {"x": [1, 2]}
        });
        let record = TestRecord::Direct(raw.as_object().unwrap());
        assert!(record.details().unwrap().contains_key("y"));
    }

    #[test]
    fn test_breakpoints_accept_numbers_and_numeric_strings() {
        let page = PageResult::from_value(json!({
            "url": "u",
            "results": {"accessibility": {"responsive_testing": {
                "breakpoints": [320, "768", "wide", 1024],
                "breakpoint_results": {"320": {}, "x": {}, "1024": {}}
            }}}
        }));
        let block = page.responsive().unwrap();
        assert_eq!(block.breakpoints(), vec![320, 768, 1024]);
        assert_eq!(
            block.breakpoint_results().keys().copied().collect::<Vec<_>>(),
            vec![320, 1024]
        );
        assert!(block.responsive_tests(320).is_none());
    }

    #[test]
    fn test_site_origin() {
        assert_eq!(site_origin("https://example.com/a/b?q=1"), "https://example.com");
        assert_eq!(site_origin("http://localhost:8080"), "http://localhost:8080");
        assert_eq!(site_origin("https://example.com:443/x"), "https://example.com");
        assert_eq!(site_origin("not a url"), UNKNOWN_SITE);
        assert_eq!(site_origin("mailto:team@example.com"), UNKNOWN_SITE);
    }

    #[test]
    fn test_site_origin_ignores_case() {
        assert_eq!(site_origin("HTTPS://A.Test/x"), site_origin("https://a.test/y"));
        assert_eq!(site_origin("HTTPS://A.Test/x"), "https://a.test");
    }

    #[test]
    fn test_padded_breakpoint_keys_are_found() {
        let page = PageResult::from_value(json!({
            "url": "u",
            "results": {"accessibility": {"responsive_testing": {
                "breakpoints": [320, 768],
                "breakpoint_results": {
                    " 320": {"tests": {"responsive": {"tests": {"overflow": {"issues": []}}}}},
                    "0768": {"tests": {"responsive": {"tests": {"fontScaling": {"issues": []}}}}}
                }
            }}}
        }));
        let block = page.responsive().unwrap();
        assert!(block.responsive_tests(320).unwrap().contains_key("overflow"));
        assert!(block.responsive_tests(768).unwrap().contains_key("fontScaling"));
    }

    #[test]
    fn test_split_domain_page() {
        assert_eq!(
            split_domain_page("https://example.com/docs/intro"),
            ("example.com".to_string(), "docs/intro".to_string())
        );
        assert_eq!(
            split_domain_page("http://example.com"),
            ("example.com".to_string(), String::new())
        );
    }

    #[test]
    fn test_run_id_accepts_extended_json() {
        let page = PageResult::from_value(json!({"test_run_id": {"$oid": "abc"}}));
        assert_eq!(page.test_run_id(), Some("abc"));
        let page = PageResult::from_value(json!({"test_run_id": "r1"}));
        assert_eq!(page.test_run_id(), Some("r1"));
    }
}
