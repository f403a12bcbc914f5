//! Accessors for untyped resource objects
//!
//! Objects are kept as `serde_json::Value` end to end; these helpers read the
//! few fields every component needs without deserializing into typed models.

use serde_json::Value;
use std::collections::BTreeMap;

/// `metadata.name`
pub fn name_of(obj: &Value) -> Option<&str> {
    obj.pointer("/metadata/name").and_then(Value::as_str)
}

/// `metadata.namespace`
pub fn namespace_of(obj: &Value) -> Option<&str> {
    obj.pointer("/metadata/namespace").and_then(Value::as_str)
}

/// Top-level `kind`
pub fn kind_of(obj: &Value) -> Option<&str> {
    obj.get("kind").and_then(Value::as_str)
}

/// Sequence at a JSON pointer, empty when absent or not a sequence
pub fn array_at<'a>(obj: &'a Value, pointer: &str) -> &'a [Value] {
    obj.pointer(pointer)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// String at a JSON pointer
pub fn str_at<'a>(obj: &'a Value, pointer: &str) -> Option<&'a str> {
    obj.pointer(pointer).and_then(Value::as_str)
}

/// Read a label-style map (`labels`, `selector`, `matchLabels`)
///
/// Scalar values are rendered to strings so that `version: 2` and
/// `version: "2"` compare equal; nested values are ignored.
pub fn string_map(value: Option<&Value>) -> BTreeMap<String, String> {
    let Some(map) = value.and_then(Value::as_object) else {
        return BTreeMap::new();
    };

    map.iter()
        .filter_map(|(k, v)| {
            let rendered = match v {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => return None,
            };
            Some((k.clone(), rendered))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metadata_accessors() {
        let obj = json!({
            "kind": "Service",
            "metadata": {"name": "web", "namespace": "shop"}
        });
        assert_eq!(kind_of(&obj), Some("Service"));
        assert_eq!(name_of(&obj), Some("web"));
        assert_eq!(namespace_of(&obj), Some("shop"));
    }

    #[test]
    fn test_array_at_missing_is_empty() {
        let obj = json!({"spec": {"ports": "not-a-list"}});
        assert!(array_at(&obj, "/spec/ports").is_empty());
        assert!(array_at(&obj, "/spec/rules").is_empty());
    }

    #[test]
    fn test_string_map_renders_scalars() {
        let labels = json!({"app": "web", "version": 2, "canary": false, "nested": {"a": 1}});
        let map = string_map(Some(&labels));
        assert_eq!(map.get("app").map(String::as_str), Some("web"));
        assert_eq!(map.get("version").map(String::as_str), Some("2"));
        assert_eq!(map.get("canary").map(String::as_str), Some("false"));
        assert!(!map.contains_key("nested"));
        assert!(string_map(None).is_empty());
    }
}
