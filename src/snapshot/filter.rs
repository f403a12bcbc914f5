//! Skip and managed filters
//!
//! A resource enters the snapshot only if it is neither a system default
//! (decided from its name alone) nor managed by Helm or an operator
//! (decided from its labels and owner references).

use crate::models::ResourceKind;
use crate::source::ObjectProbe;

/// ConfigMap/Secret name prefixes created by Kubernetes or Helm
pub const SYSTEM_CONFIG_PREFIXES: &[&str] = &["kube-", "default-token-", "sh.helm.release"];

/// Built-in cluster-scoped RBAC name prefixes
pub const SYSTEM_CLUSTER_PREFIXES: &[&str] = &[
    "system:",
    "cluster-admin",
    "admin",
    "edit",
    "view",
    "kubeadm:",
    "node-",
    "kubernetes-",
];

/// Label keys that mark a resource as managed
pub const MANAGED_LABELS: &[&str] = &["helm.sh/chart", "app.kubernetes.io/managed-by"];

/// Name-only filter for system defaults
pub fn should_skip(kind: ResourceKind, name: &str) -> bool {
    match kind {
        ResourceKind::ServiceAccount => name == "default",
        ResourceKind::ConfigMap | ResourceKind::Secret => SYSTEM_CONFIG_PREFIXES
            .iter()
            .any(|prefix| name.starts_with(prefix)),
        kind if kind.is_cluster_scoped() => SYSTEM_CLUSTER_PREFIXES
            .iter()
            .any(|prefix| name.starts_with(prefix)),
        _ => false,
    }
}

/// Managed by Helm or an operator
pub fn is_managed(probe: &ObjectProbe) -> bool {
    MANAGED_LABELS
        .iter()
        .any(|label| probe.labels.contains_key(*label))
        || !probe.owners.is_empty()
}
