//! Resource snapshot cache
//!
//! Holds every unmanaged resource of the target namespace (plus unmanaged
//! cluster-scoped RBAC) for the duration of one run. The snapshot is filled
//! once by [`SnapshotBuilder`] and only read afterwards, so resolvers can
//! share it freely.

mod builder;
pub mod filter;

pub use builder::{DEFAULT_WORKERS, SnapshotBuilder};

use crate::models::{ResourceKind, ResourceRef};
use serde_json::Value;
use std::collections::BTreeMap;

/// Unmanaged resources keyed by kind, then name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    namespace: String,
    resources: BTreeMap<ResourceKind, BTreeMap<String, Value>>,
}

impl Snapshot {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            resources: BTreeMap::new(),
        }
    }

    /// Target namespace
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn insert(&mut self, kind: ResourceKind, name: impl Into<String>, obj: Value) {
        self.resources
            .entry(kind)
            .or_default()
            .insert(name.into(), obj);
    }

    pub fn get(&self, kind: ResourceKind, name: &str) -> Option<&Value> {
        self.resources.get(&kind).and_then(|by_name| by_name.get(name))
    }

    pub fn contains(&self, kind: ResourceKind, name: &str) -> bool {
        self.get(kind, name).is_some()
    }

    pub fn contains_ref(&self, resource: &ResourceRef) -> bool {
        self.contains(resource.kind, &resource.name)
    }

    /// Names of one kind in sorted order
    pub fn names(&self, kind: ResourceKind) -> impl Iterator<Item = &str> {
        self.resources
            .get(&kind)
            .into_iter()
            .flat_map(|by_name| by_name.keys().map(String::as_str))
    }

    /// Objects of one kind in name order
    pub fn objects(&self, kind: ResourceKind) -> impl Iterator<Item = (&str, &Value)> {
        self.resources
            .get(&kind)
            .into_iter()
            .flat_map(|by_name| by_name.iter().map(|(name, obj)| (name.as_str(), obj)))
    }

    /// Every workload, grouped by kind in processing order
    pub fn workloads(&self) -> impl Iterator<Item = (ResourceRef, &Value)> {
        ResourceKind::workloads().iter().flat_map(move |kind| {
            self.objects(*kind)
                .map(move |(name, obj)| (ResourceRef::new(*kind, name), obj))
        })
    }

    /// Total number of cached resources
    pub fn len(&self) -> usize {
        self.resources.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_workloads_follow_kind_order() {
        let mut snapshot = Snapshot::new("shop");
        snapshot.insert(ResourceKind::Job, "migrate", json!({}));
        snapshot.insert(ResourceKind::Deployment, "web", json!({}));
        snapshot.insert(ResourceKind::Deployment, "api", json!({}));
        snapshot.insert(ResourceKind::ConfigMap, "cfg", json!({}));

        let refs: Vec<String> = snapshot.workloads().map(|(r, _)| r.to_string()).collect();
        assert_eq!(
            refs,
            vec!["deployments/api", "deployments/web", "jobs/migrate"]
        );
        assert_eq!(snapshot.len(), 4);
    }

    #[test]
    fn test_names_of_missing_kind_is_empty() {
        let snapshot = Snapshot::new("shop");
        assert_eq!(snapshot.names(ResourceKind::Route).count(), 0);
        assert!(snapshot.is_empty());
        assert!(!snapshot.contains(ResourceKind::Route, "web"));
    }
}
