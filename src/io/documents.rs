//! Documents arrive as exports from the result store: either one JSON array
//! or a stream of JSON values (JSON Lines).

use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::errors::{ReportError, Result};
use crate::model::{object_id, PageResult};
use crate::observability::{set_phase, ReportPhase};

/// Parse a JSON array, a single object, or whitespace-separated values.
pub fn parse_documents(contents: &str) -> std::result::Result<Vec<Value>, serde_json::Error> {
    let values = serde_json::Deserializer::from_str(contents)
        .into_iter::<Value>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(match <[Value; 1]>::try_from(values) {
        Ok([Value::Array(items)]) => items,
        Ok([single]) => vec![single],
        Err(values) => values,
    })
}

pub fn read_documents(path: &Path) -> Result<Vec<Value>> {
    let contents = fs::read_to_string(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_documents(&contents).map_err(|source| ReportError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn wanted(id: Option<&str>, run_ids: &[String]) -> bool {
    run_ids.is_empty() || id.is_some_and(|id| run_ids.iter().any(|wanted| wanted == id))
}

/// Page results from `path`, keeping only those whose `test_run_id` is in
/// `run_ids` when any are given.
pub fn load_pages(path: &Path, run_ids: &[String]) -> Result<Vec<PageResult>> {
    let _phase = set_phase(ReportPhase::Loading);
    let documents = read_documents(path)?;
    let total = documents.len();
    let pages: Vec<PageResult> = documents
        .into_iter()
        .map(PageResult::from_value)
        .filter(|page| wanted(page.test_run_id(), run_ids))
        .collect();
    if pages.len() < total {
        debug!(kept = pages.len(), total, "filtered pages by run id");
    }
    info!(path = %path.display(), pages = pages.len(), "loaded page results");
    Ok(pages)
}

/// Test runs whose `_id` is in `run_ids`, or all of them.
pub fn filter_runs(runs: Vec<Value>, run_ids: &[String]) -> Vec<Value> {
    runs.into_iter()
        .filter(|run| wanted(run.get("_id").and_then(object_id), run_ids))
        .collect()
}

pub fn load_runs(path: &Path, run_ids: &[String]) -> Result<Vec<Value>> {
    let _phase = set_phase(ReportPhase::Loading);
    let runs = filter_runs(read_documents(path)?, run_ids);
    info!(path = %path.display(), runs = runs.len(), "loaded test runs");
    Ok(runs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_parse_array_object_and_lines() {
        assert_eq!(parse_documents(r#"[{"a": 1}, {"a": 2}]"#).unwrap().len(), 2);
        assert_eq!(parse_documents(r#"{"a": 1}"#).unwrap(), vec![json!({"a": 1})]);
        let lines = indoc! {r#"
            {"url": "https://a.test"}
            {"url": "https://b.test"}

            {"url": "https://c.test"}
        "#};
        assert_eq!(parse_documents(lines).unwrap().len(), 3);
        assert!(parse_documents("").unwrap().is_empty());
        assert!(parse_documents("{not json").is_err());
    }

    #[test]
    fn test_load_pages_filters_by_run_id() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pages.jsonl");
        fs::write(
            &path,
            indoc! {r#"
                {"url": "https://a.test", "test_run_id": {"$oid": "r1"}}
                {"url": "https://b.test", "test_run_id": "r2"}
                {"url": "https://c.test"}
            "#},
        )
        .unwrap();

        assert_eq!(load_pages(&path, &[]).unwrap().len(), 3);
        let pages = load_pages(&path, &["r1".to_string()]).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].url(), "https://a.test");
    }

    #[test]
    fn test_filter_runs_by_id() {
        let runs = vec![json!({"_id": {"$oid": "r1"}}), json!({"_id": "r2"})];
        assert_eq!(filter_runs(runs.clone(), &["r2".to_string()]), vec![json!({"_id": "r2"})]);
        assert_eq!(filter_runs(runs, &[]).len(), 2);
    }

    #[test]
    fn test_read_errors_name_the_path() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(read_documents(&missing), Err(ReportError::Io { .. })));

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "[1,").unwrap();
        let err = read_documents(&bad).unwrap_err();
        assert!(matches!(err, ReportError::Json { .. }));
        assert!(err.to_string().contains("bad.json"));
    }
}
