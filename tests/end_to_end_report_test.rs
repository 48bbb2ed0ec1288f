use a11y_report::{build_report, DocumentationResolver, PageResult, ReportConfig};
use a11y_report::summary::summarize;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn forms_page() -> PageResult {
    PageResult::from_value(json!({
        "url": "https://example.com",
        "results": {"accessibility": {"tests": {
            "forms": {"forms": {
                "pageFlags": {"hasInputsWithoutLabels": true},
                "details": {"inputsWithoutLabels": [{}, {}]}
            }}
        }}}
    }))
}

fn forms_documentation() -> Value {
    json!({
        "testName": "Form Accessibility Analysis",
        "description": "Checks form controls",
        "version": "1.2.0",
        "date": "2025-01-15",
        "tests": [{
            "id": "input-labels",
            "name": "Input Field Labeling",
            "description": "Inputs need labels",
            "impact": "high",
            "wcagCriteria": ["1.3.1", "4.1.2"],
            "howToFix": "Add a <label>",
            "resultsFields": {"pageFlags.hasInputsWithoutLabels": "boolean"}
        }]
    })
}

#[test]
fn documented_check_names_the_issue() {
    let mut resolver = DocumentationResolver::new("has");
    assert!(resolver.register("forms", &forms_documentation()));

    let summary = summarize(&[forms_page()], &resolver).unwrap();
    assert_eq!(summary.total_issues, 2);
    assert_eq!(
        summary.issues_by_type["Form Accessibility Analysis - Input Field Labeling"],
        2
    );
}

#[test]
fn undocumented_test_falls_back_to_formatted_label() {
    let summary = summarize(&[forms_page()], &DocumentationResolver::new("has")).unwrap();
    assert_eq!(summary.issues_by_type["Forms: Inputs Without Labels"], 2);
    assert_eq!(summary.total_issues, 2);
}

#[test]
fn report_combines_runs_pages_and_malformed_records() {
    let run = json!({"_id": {"$oid": "r1"}, "documentation": {"forms": forms_documentation()}});
    let pages = vec![
        forms_page(),
        PageResult::from_value(json!({"url": "https://example.com/broken"})),
        PageResult::from_value(json!({
            "url": "https://other.test/about",
            "results": {"accessibility": {"tests": {
                "images": {"images": {"pageFlags": {"hasImagesWithoutAlt": true, "hasOther": false}}}
            }}}
        })),
    ];

    let report = build_report(&pages, &[run], &ReportConfig::default()).unwrap();

    assert_eq!(report.summary.total_pages, 3);
    assert_eq!(report.summary.pages_with_issues, 2);
    assert_eq!(report.summary.total_issues, 3);
    let by_type: Vec<_> = report
        .issues_by_type
        .iter()
        .map(|entry| (entry.issue_type.as_str(), entry.count))
        .collect();
    assert_eq!(
        by_type,
        vec![
            ("Form Accessibility Analysis - Input Field Labeling", 2),
            ("Images: Images Without Alt", 1),
        ]
    );

    let sites: Vec<_> = report.issues_by_site.iter().map(|i| i.scope.as_str()).collect();
    assert_eq!(sites, vec!["https://example.com", "https://other.test"]);

    let kinds: Vec<_> = report
        .documentation
        .iter()
        .map(|row| row.kind.as_str())
        .collect();
    assert_eq!(kinds, vec!["Test", "Check"]);
    assert_eq!(
        report.documentation[1].test_name,
        "Form Accessibility Analysis - Input Field Labeling"
    );
    assert_eq!(report.documentation[1].wcag_criteria, "1.3.1, 4.1.2");
}

#[test]
fn report_serializes_to_json() {
    let report = build_report(&[forms_page()], &[], &ReportConfig::default()).unwrap();
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["summary"]["total_issues"], json!(2));
    assert_eq!(
        value["issuesByType"][0],
        json!({"issueType": "Forms: Inputs Without Labels", "count": 2})
    );
}

#[test]
fn breakpoint_matrix_marks_untested_types() {
    let page = PageResult::from_value(json!({
        "url": "https://example.com/cart",
        "results": {"accessibility": {
            "tests": {},
            "responsive_testing": {
                "breakpoints": [320, 1024],
                "breakpoint_results": {
                    "320": {"tests": {"responsive": {"tests": {
                        "overflow": {"issues": [{"element": "div.hero", "description": "wider than viewport"}]},
                        "touchTargets": {"issues": []}
                    }}}},
                    "1024": {"tests": {"responsive": {"tests": {
                        "overflow": {"issues": []}
                    }}}}
                }
            }
        }}
    }));
    let report = build_report(&[page], &[], &ReportConfig::default()).unwrap();
    let cells: Vec<_> = report
        .breakpoint_matrix
        .iter()
        .map(|row| (row.breakpoint, row.test.as_str(), row.status.as_str(), row.issue_count))
        .collect();
    assert_eq!(
        cells,
        vec![
            (320, "overflow", "Issues Found", Some(1)),
            (320, "touchTargets", "Pass", Some(0)),
            (1024, "overflow", "Pass", Some(0)),
            (1024, "touchTargets", "Not Tested", None),
        ]
    );
    assert!(report
        .breakpoint_matrix
        .iter()
        .all(|row| row.domain == "example.com" && row.page == "cart"));
}
