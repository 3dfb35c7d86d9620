//! Canonical JSON encoding.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{EngineError, EngineResult};

/// Returns `value` with every object's keys in sorted order, recursively.
pub fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = Map::with_capacity(entries.len());
            for (key, inner) in entries {
                sorted.insert(key, canonicalize(inner));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// Serialises `payload` to its canonical JSON string.
///
/// # Examples
///
/// ```
/// use impact_engine::audit::canonical_json;
///
/// let json = canonical_json(&serde_json::json!({"b": 1, "a": {"d": [2], "c": null}})).unwrap();
/// assert_eq!(json, r#"{"a":{"c":null,"d":[2]},"b":1}"#);
/// ```
pub fn canonical_json<T: Serialize + ?Sized>(payload: &T) -> EngineResult<String> {
    let value = serde_json::to_value(payload).map_err(|e| EngineError::CalculationError {
        message: format!("payload is not representable as JSON: {}", e),
    })?;
    serde_json::to_string(&canonicalize(value)).map_err(|e| EngineError::CalculationError {
        message: format!("canonical JSON encoding failed: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_keys_are_sorted() {
        let json = canonical_json(&json!({
            "zeta": {"y": 1, "x": 2},
            "alpha": [{"k2": true, "k1": false}]
        }))
        .unwrap();
        assert_eq!(json, r#"{"alpha":[{"k1":false,"k2":true}],"zeta":{"x":2,"y":1}}"#);
    }

    #[test]
    fn test_array_order_is_preserved() {
        assert_eq!(canonical_json(&json!([3, 1, 2])).unwrap(), "[3,1,2]");
    }

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(canonical_json(&json!("text")).unwrap(), "\"text\"");
        assert_eq!(canonical_json(&json!(null)).unwrap(), "null");
    }

    #[test]
    fn test_non_string_map_keys_are_rejected() {
        let mut map = std::collections::HashMap::new();
        map.insert((1, 2), "tuple key");
        assert!(matches!(
            canonical_json(&map),
            Err(EngineError::CalculationError { .. })
        ));
    }
}
