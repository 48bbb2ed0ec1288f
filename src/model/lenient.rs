//! Deserialization helpers for hand-authored documentation payloads, where a
//! version may be written as `1.0` instead of `"1.0"` and keys may be `null`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Render a JSON scalar the way a report cell shows it.
pub(crate) fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(&value))
}

pub(crate) fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        other => Some(scalar_to_string(&other)),
    })
}

pub(crate) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.iter().map(scalar_to_string).collect(),
        Value::Null => Vec::new(),
        single => vec![scalar_to_string(&single)],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_to_string_matches_cell_rendering() {
        assert_eq!(scalar_to_string(&json!("a")), "a");
        assert_eq!(scalar_to_string(&json!(1.5)), "1.5");
        assert_eq!(scalar_to_string(&json!(true)), "true");
        assert_eq!(scalar_to_string(&Value::Null), "");
    }
}
