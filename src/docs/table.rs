use serde::Serialize;

use super::resolver::DocumentationResolver;

/// Row kind in the documentation table. `Test` sorts before `Check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum DocumentationRowKind {
    Test,
    Check,
}

impl DocumentationRowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Test => "Test",
            Self::Check => "Check",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentationRow {
    pub test_name: String,
    #[serde(rename = "type")]
    pub kind: DocumentationRowKind,
    pub description: String,
    pub version: String,
    pub date: String,
    pub wcag_criteria: String,
    pub impact: String,
    pub how_to_fix: String,
}

/// One `Test` row per registered record followed by one `Check` row per
/// named check, sorted by display name and then by row kind.
pub fn documentation_table(resolver: &DocumentationResolver) -> Vec<DocumentationRow> {
    let mut rows = Vec::new();
    for (test_id, doc) in resolver.records() {
        let display_name = doc.display_name(test_id);
        rows.push(DocumentationRow {
            test_name: display_name.clone(),
            kind: DocumentationRowKind::Test,
            description: doc.description.clone(),
            version: doc.version.clone(),
            date: doc.date.clone(),
            wcag_criteria: String::new(),
            impact: String::new(),
            how_to_fix: String::new(),
        });
        rows.extend(
            doc.tests
                .iter()
                .filter(|check| !check.name.is_empty())
                .map(|check| DocumentationRow {
                    test_name: format!("{display_name} - {}", check.name),
                    kind: DocumentationRowKind::Check,
                    description: check.description.clone(),
                    version: String::new(),
                    date: String::new(),
                    wcag_criteria: check.wcag_criteria.join(", "),
                    impact: check.impact.to_string(),
                    how_to_fix: check.how_to_fix.clone(),
                }),
        );
    }
    rows.sort_by(|a, b| a.test_name.cmp(&b.test_name).then(a.kind.cmp(&b.kind)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_check_rows_follow_their_test_row() {
        let mut resolver = DocumentationResolver::new("has");
        resolver.register(
            "keyboard",
            &json!({
                "testName": "Keyboard Navigation",
                "version": "1.2",
                "tests": [
                    {"name": "Tab Order", "impact": "high", "wcagCriteria": ["2.4.3"]},
                    {"description": "unnamed checks are left out"}
                ]
            }),
        );
        resolver.register(
            "colors",
            &json!({
                "testName": "Color and Contrast",
                "tests": [{
                    "name": "Text Contrast",
                    "impact": "critical",
                    "wcagCriteria": ["1.4.3", "1.4.6"],
                    "howToFix": "Darken text"
                }]
            }),
        );

        let rows = documentation_table(&resolver);
        let names: Vec<_> = rows
            .iter()
            .map(|row| (row.test_name.as_str(), row.kind.as_str()))
            .collect();
        assert_eq!(
            names,
            vec![
                ("Color and Contrast", "Test"),
                ("Color and Contrast - Text Contrast", "Check"),
                ("Keyboard Navigation", "Test"),
                ("Keyboard Navigation - Tab Order", "Check"),
            ]
        );
        assert_eq!(rows[1].wcag_criteria, "1.4.3, 1.4.6");
        assert_eq!(rows[1].impact, "critical");
        assert_eq!(rows[2].version, "1.2");
    }

    #[test]
    fn test_display_name_falls_back_to_title_cased_id() {
        let mut resolver = DocumentationResolver::new("has");
        resolver.register("page_structure", &json!({}));
        let rows = documentation_table(&resolver);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].test_name, "Page Structure");
    }
}
