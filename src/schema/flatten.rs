use serde_json::Value;
use std::collections::BTreeMap;

/// Dotted field path to rendered leaf value.
pub type FlattenedRow = BTreeMap<String, String>;

/// Flatten a nested record into dotted paths.
///
/// Objects are recursed into; arrays are leaves encoded as JSON text; other
/// scalars are rendered as text. A non-object `record` produces a single
/// entry under `prefix` (nothing when `prefix` is empty).
pub fn flatten(record: &Value, prefix: &str) -> FlattenedRow {
    let mut row = FlattenedRow::new();
    flatten_into(&mut row, record, prefix);
    row
}

fn flatten_into(row: &mut FlattenedRow, value: &Value, prefix: &str) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_into(row, child, &join_path(prefix, key));
            }
        }
        leaf if !prefix.is_empty() => {
            row.insert(prefix.to_string(), render_leaf(leaf));
        }
        _ => {}
    }
}

pub(crate) fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Text form of a non-object value. Strings are unquoted; arrays and other
/// scalars use their JSON text.
pub fn render_leaf(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_record() {
        let record = json!({
            "pageFlags": {"hasInputsWithoutLabels": true, "details": {"count": 2}},
            "labels": ["a", "b"],
            "timestamp": "2025-01-01",
            "score": null
        });
        let row = flatten(&record, "forms");
        let expected: FlattenedRow = [
            ("forms.labels", r#"["a","b"]"#),
            ("forms.pageFlags.details.count", "2"),
            ("forms.pageFlags.hasInputsWithoutLabels", "true"),
            ("forms.score", "null"),
            ("forms.timestamp", "2025-01-01"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(row, expected);
    }

    #[test]
    fn test_flatten_without_prefix() {
        let row = flatten(&json!({"a": {"b": 1}}), "");
        assert_eq!(row.get("a.b").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_scalar_record_uses_prefix_as_key() {
        let row = flatten(&json!("passed"), "images");
        assert_eq!(row.get("images").map(String::as_str), Some("passed"));
        assert!(flatten(&json!(3), "").is_empty());
    }

    #[test]
    fn test_empty_object_contributes_nothing() {
        assert!(flatten(&json!({"a": {}}), "t").is_empty());
    }

    #[test]
    fn test_lists_are_not_expanded() {
        let record = json!({"items": [{"nested": {"deep": 1}}]});
        let row = flatten(&record, "");
        assert_eq!(row.len(), 1);
        let decoded: Value = serde_json::from_str(&row["items"]).unwrap();
        assert_eq!(decoded, record["items"]);
    }
}
