//! Documentation records authored alongside each test implementation.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::lenient;
use crate::docs::label::title_case;
use crate::errors::{ReportError, Result};

static WCAG_CRITERION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\d+\.\d+$").expect("valid WCAG criterion pattern"));

/// Whether `criterion` has the `digit.digit.digit` shape (e.g. `1.4.11`).
pub fn is_wcag_criterion(criterion: &str) -> bool {
    WCAG_CRITERION.is_match(criterion)
}

/// Describes one test type and the checks it performs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentationRecord {
    #[serde(deserialize_with = "lenient::optional_string")]
    pub test_name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(deserialize_with = "lenient::string")]
    pub version: String,
    #[serde(deserialize_with = "lenient::string")]
    pub date: String,
    pub tests: Vec<CheckRecord>,
}

impl DocumentationRecord {
    /// Decode a documentation payload found for `test_id`.
    pub fn from_value(test_id: &str, value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(ReportError::MalformedDocumentation {
                test_id: test_id.to_string(),
                message: "documentation is not an object".to_string(),
            });
        }
        Self::deserialize(value).map_err(|e| ReportError::MalformedDocumentation {
            test_id: test_id.to_string(),
            message: e.to_string(),
        })
    }

    /// `testName`, or the test id title-cased with underscores as spaces.
    pub fn display_name(&self, test_id: &str) -> String {
        self.test_name
            .clone()
            .unwrap_or_else(|| title_case(&test_id.replace('_', " ")))
    }

    /// Criteria across all checks that do not have the `d.d.d` shape.
    pub fn malformed_criteria(&self) -> Vec<&str> {
        self.tests
            .iter()
            .flat_map(|check| check.wcag_criteria.iter())
            .map(String::as_str)
            .filter(|criterion| !is_wcag_criterion(criterion))
            .collect()
    }
}

/// A single check within a test type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckRecord {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
    pub impact: Impact,
    #[serde(deserialize_with = "lenient::string_list")]
    pub wcag_criteria: Vec<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub how_to_fix: String,
    /// Dotted result-field suffix to description.
    pub results_fields: Map<String, Value>,
}

impl CheckRecord {
    /// Whether any declared result field is, or ends with, one of `patterns`.
    pub fn references_any(&self, patterns: &[String]) -> bool {
        self.results_fields.keys().any(|field| {
            patterns
                .iter()
                .any(|pattern| field == pattern || field.ends_with(pattern.as_str()))
        })
    }
}

/// Severity a check assigns to its failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Impact {
    Critical,
    High,
    Medium,
    Low,
    #[default]
    Unspecified,
}

impl Impact {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "critical" => Self::Critical,
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            _ => Self::Unspecified,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Unspecified => "",
        }
    }
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Impact {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Impact {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = lenient::string(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn forms_doc() -> Value {
        json!({
            "testName": "Form Accessibility Analysis",
            "description": "Evaluates forms",
            "version": 1.0,
            "date": "2025-03-19",
            "tests": [{
                "id": "forms-input-labels",
                "name": "Input Field Labeling",
                "impact": "High",
                "wcagCriteria": ["1.3.1", "4.1.2"],
                "howToFix": "Add labels",
                "resultsFields": {
                    "pageFlags.hasInputsWithoutLabels": "Inputs lack labels",
                    "pageFlags.details.inputsWithoutLabels": "Count"
                }
            }]
        })
    }

    #[test]
    fn test_decodes_loosely_typed_payload() {
        let doc = DocumentationRecord::from_value("forms", &forms_doc()).unwrap();
        assert_eq!(doc.test_name.as_deref(), Some("Form Accessibility Analysis"));
        assert_eq!(doc.version, "1.0");
        assert_eq!(doc.tests.len(), 1);
        assert_eq!(doc.tests[0].impact, Impact::High);
        assert_eq!(doc.tests[0].wcag_criteria, vec!["1.3.1", "4.1.2"]);
    }

    #[test]
    fn test_missing_fields_default() {
        let doc = DocumentationRecord::from_value("x", &json!({})).unwrap();
        assert_eq!(doc, DocumentationRecord::default());
        assert_eq!(doc.display_name("page_structure"), "Page Structure");
    }

    #[test]
    fn test_non_object_is_malformed() {
        let err = DocumentationRecord::from_value("forms", &json!("nope")).unwrap_err();
        assert!(err.is_recoverable());
        let err = DocumentationRecord::from_value("forms", &json!({"tests": 3})).unwrap_err();
        assert!(matches!(err, ReportError::MalformedDocumentation { .. }));
    }

    #[test]
    fn test_references_any_matches_suffix_or_equality() {
        let doc = DocumentationRecord::from_value("forms", &forms_doc()).unwrap();
        let check = &doc.tests[0];
        assert!(check.references_any(&["hasInputsWithoutLabels".to_string()]));
        assert!(check.references_any(&["pageFlags.hasInputsWithoutLabels".to_string()]));
        assert!(!check.references_any(&["hasPlaceholderOnlyInputs".to_string()]));
    }

    #[test]
    fn test_wcag_criterion_shape() {
        assert!(is_wcag_criterion("1.4.11"));
        assert!(!is_wcag_criterion("1.4"));
        assert!(!is_wcag_criterion("AA"));
        let doc = DocumentationRecord::from_value(
            "colors",
            &json!({"tests": [{"wcagCriteria": ["1.4.3", "1.4"]}]}),
        )
        .unwrap();
        assert_eq!(doc.malformed_criteria(), vec!["1.4"]);
    }
}
