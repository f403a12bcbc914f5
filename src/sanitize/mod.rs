//! Manifest sanitizer
//!
//! Produces a cleaned copy of a cached object with server-assigned fields
//! removed, ready to be applied to another cluster. The input is never
//! modified, so an object shared by two closures exports identically for
//! both.

mod rules;

pub use rules::{CleanRuleSet, DEFAULT_RULES};

use serde_json::{Map, Value};

/// Clean `obj` with [`DEFAULT_RULES`]
pub fn clean(obj: &Value) -> Value {
    clean_with(obj, &DEFAULT_RULES)
}

/// Clean a deep copy of `obj` with the given rules
///
/// Removes `status`, the listed metadata, annotation, spec and port keys, and
/// then any `annotations` or `labels` map left empty. Applying it twice gives
/// the same result as applying it once.
pub fn clean_with(obj: &Value, rules: &CleanRuleSet) -> Value {
    let mut cleaned = obj.clone();
    let Some(root) = cleaned.as_object_mut() else {
        return cleaned;
    };

    root.shift_remove("status");

    if let Some(metadata) = root.get_mut("metadata").and_then(Value::as_object_mut) {
        remove_keys(metadata, rules.metadata);

        if let Some(annotations) = metadata
            .get_mut("annotations")
            .and_then(Value::as_object_mut)
        {
            remove_keys(annotations, rules.annotations);
        }
        remove_if_empty(metadata, "annotations");
        remove_if_empty(metadata, "labels");
    }

    if let Some(spec) = root.get_mut("spec").and_then(Value::as_object_mut) {
        remove_keys(spec, rules.spec);

        if let Some(ports) = spec.get_mut("ports").and_then(Value::as_array_mut) {
            for port in ports.iter_mut().filter_map(Value::as_object_mut) {
                remove_keys(port, rules.port);
            }
        }
    }

    cleaned
}

fn remove_keys(map: &mut Map<String, Value>, keys: &[&str]) {
    for key in keys {
        map.shift_remove(*key);
    }
}

fn remove_if_empty(map: &mut Map<String, Value>, key: &str) {
    if map
        .get(key)
        .and_then(Value::as_object)
        .is_some_and(Map::is_empty)
    {
        map.shift_remove(key);
    }
}
