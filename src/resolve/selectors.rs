//! Label selector matching for Services and NetworkPolicies
//!
//! A selector matches when every one of its pairs appears with the same value
//! in the label map. Empty selectors never match.

use crate::models::ResourceKind;
use crate::models::object::string_map;
use crate::snapshot::Snapshot;
use serde_json::Value;
use std::collections::BTreeMap;

/// Subset match of `selector` against `labels`
pub fn selector_matches(selector: &BTreeMap<String, String>, labels: &BTreeMap<String, String>) -> bool {
    !selector.is_empty()
        && selector
            .iter()
            .all(|(key, value)| labels.get(key) == Some(value))
}

/// Services whose `spec.selector` picks the workload's pods
///
/// Pod labels come from the workload's `spec.selector.matchLabels`.
pub fn match_services(workload: &Value, snapshot: &Snapshot) -> Vec<String> {
    let pod_labels = string_map(workload.pointer("/spec/selector/matchLabels"));
    matching(snapshot, ResourceKind::Service, "/spec/selector", &pod_labels)
}

/// NetworkPolicies whose `spec.podSelector.matchLabels` picks the workload's pods
///
/// Pod labels come from `spec.template.metadata.labels`.
pub fn match_network_policies(workload: &Value, snapshot: &Snapshot) -> Vec<String> {
    let pod_labels = string_map(workload.pointer("/spec/template/metadata/labels"));
    matching(
        snapshot,
        ResourceKind::NetworkPolicy,
        "/spec/podSelector/matchLabels",
        &pod_labels,
    )
}

fn matching(
    snapshot: &Snapshot,
    kind: ResourceKind,
    selector_pointer: &str,
    pod_labels: &BTreeMap<String, String>,
) -> Vec<String> {
    if pod_labels.is_empty() {
        return Vec::new();
    }

    snapshot
        .objects(kind)
        .filter(|(_, obj)| {
            let selector = string_map(obj.pointer(selector_pointer));
            selector_matches(&selector, pod_labels)
        })
        .map(|(name, _)| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn snapshot() -> Snapshot {
        let mut snapshot = Snapshot::new("shop");
        snapshot.insert(
            ResourceKind::Service,
            "web",
            json!({"spec": {"selector": {"app": "web"}}}),
        );
        snapshot.insert(
            ResourceKind::Service,
            "web-canary",
            json!({"spec": {"selector": {"app": "web", "track": "canary"}}}),
        );
        snapshot.insert(
            ResourceKind::Service,
            "external",
            json!({"spec": {"type": "ExternalName", "externalName": "db.example.com"}}),
        );
        snapshot.insert(
            ResourceKind::NetworkPolicy,
            "allow-web",
            json!({"spec": {"podSelector": {"matchLabels": {"app": "web"}}}}),
        );
        snapshot.insert(
            ResourceKind::NetworkPolicy,
            "deny-all",
            json!({"spec": {"podSelector": {}}}),
        );
        snapshot
    }

    #[test]
    fn test_selector_subset() {
        let pods = labels(&[("app", "web"), ("tier", "frontend")]);
        assert!(selector_matches(&labels(&[("app", "web")]), &pods));
        assert!(!selector_matches(&labels(&[("app", "api")]), &pods));
        assert!(!selector_matches(&labels(&[("app", "web"), ("track", "canary")]), &pods));
        assert!(!selector_matches(&BTreeMap::new(), &pods));
    }

    #[test]
    fn test_match_services() {
        let workload = json!({
            "spec": {"selector": {"matchLabels": {"app": "web", "tier": "frontend"}}}
        });
        assert_eq!(match_services(&workload, &snapshot()), vec!["web".to_string()]);
    }

    #[test]
    fn test_workload_without_pod_labels_matches_nothing() {
        let workload = json!({"spec": {"template": {"spec": {}}}});
        assert!(match_services(&workload, &snapshot()).is_empty());
        assert!(match_network_policies(&workload, &snapshot()).is_empty());
    }

    #[test]
    fn test_empty_policy_selector_matches_nothing() {
        let workload = json!({
            "spec": {"template": {"metadata": {"labels": {"app": "web"}}}}
        });
        assert_eq!(
            match_network_policies(&workload, &snapshot()),
            vec!["allow-web".to_string()]
        );
    }
}
