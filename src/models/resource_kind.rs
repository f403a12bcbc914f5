//! Resource kind definitions
//!
//! This module provides a centralized enum for every Kubernetes kind the
//! grouper knows how to fetch, relate and export. It carries the API
//! coordinates for each kind so the rest of the codebase never hardcodes
//! group/version/plural strings.

use std::fmt;
use std::str::FromStr;

/// Enumeration of all resource kinds handled by the grouper
///
/// Declaration order is the snapshot iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    // Workloads
    Deployment,
    StatefulSet,
    CronJob,
    Job,
    // Configuration and storage
    ConfigMap,
    Secret,
    Service,
    PersistentVolumeClaim,
    ServiceAccount,
    // RBAC
    Role,
    RoleBinding,
    ClusterRole,
    ClusterRoleBinding,
    // Networking
    Ingress,
    Route,
    NetworkPolicy,
    // Autoscaling
    HorizontalPodAutoscaler,
}

impl ResourceKind {
    /// Get the Kind name as it appears in manifests
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Deployment => "Deployment",
            ResourceKind::StatefulSet => "StatefulSet",
            ResourceKind::CronJob => "CronJob",
            ResourceKind::Job => "Job",
            ResourceKind::ConfigMap => "ConfigMap",
            ResourceKind::Secret => "Secret",
            ResourceKind::Service => "Service",
            ResourceKind::PersistentVolumeClaim => "PersistentVolumeClaim",
            ResourceKind::ServiceAccount => "ServiceAccount",
            ResourceKind::Role => "Role",
            ResourceKind::RoleBinding => "RoleBinding",
            ResourceKind::ClusterRole => "ClusterRole",
            ResourceKind::ClusterRoleBinding => "ClusterRoleBinding",
            ResourceKind::Ingress => "Ingress",
            ResourceKind::Route => "Route",
            ResourceKind::NetworkPolicy => "NetworkPolicy",
            ResourceKind::HorizontalPodAutoscaler => "HorizontalPodAutoscaler",
        }
    }

    /// Lowercase plural resource name used by the API server and in file names
    pub fn plural(&self) -> &'static str {
        match self {
            ResourceKind::Deployment => "deployments",
            ResourceKind::StatefulSet => "statefulsets",
            ResourceKind::CronJob => "cronjobs",
            ResourceKind::Job => "jobs",
            ResourceKind::ConfigMap => "configmaps",
            ResourceKind::Secret => "secrets",
            ResourceKind::Service => "services",
            ResourceKind::PersistentVolumeClaim => "persistentvolumeclaims",
            ResourceKind::ServiceAccount => "serviceaccounts",
            ResourceKind::Role => "roles",
            ResourceKind::RoleBinding => "rolebindings",
            ResourceKind::ClusterRole => "clusterroles",
            ResourceKind::ClusterRoleBinding => "clusterrolebindings",
            ResourceKind::Ingress => "ingresses",
            ResourceKind::Route => "routes",
            ResourceKind::NetworkPolicy => "networkpolicies",
            ResourceKind::HorizontalPodAutoscaler => "horizontalpodautoscalers",
        }
    }

    /// API group (empty string for the core group)
    pub fn api_group(&self) -> &'static str {
        match self {
            ResourceKind::Deployment | ResourceKind::StatefulSet => "apps",
            ResourceKind::CronJob | ResourceKind::Job => "batch",
            ResourceKind::ConfigMap
            | ResourceKind::Secret
            | ResourceKind::Service
            | ResourceKind::PersistentVolumeClaim
            | ResourceKind::ServiceAccount => "",
            ResourceKind::Role
            | ResourceKind::RoleBinding
            | ResourceKind::ClusterRole
            | ResourceKind::ClusterRoleBinding => "rbac.authorization.k8s.io",
            ResourceKind::Ingress | ResourceKind::NetworkPolicy => "networking.k8s.io",
            ResourceKind::Route => "route.openshift.io",
            ResourceKind::HorizontalPodAutoscaler => "autoscaling",
        }
    }

    /// Preferred API version
    pub fn api_version(&self) -> &'static str {
        match self {
            ResourceKind::HorizontalPodAutoscaler => "v2",
            _ => "v1",
        }
    }

    /// Cluster-scoped kinds are listed without a namespace
    pub fn is_cluster_scoped(&self) -> bool {
        matches!(
            self,
            ResourceKind::ClusterRole | ResourceKind::ClusterRoleBinding
        )
    }

    /// Workloads anchor a closure
    pub fn is_workload(&self) -> bool {
        matches!(
            self,
            ResourceKind::Deployment
                | ResourceKind::StatefulSet
                | ResourceKind::CronJob
                | ResourceKind::Job
        )
    }

    /// Try to parse a string into a ResourceKind, returning None if invalid
    pub fn parse_optional(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    /// Get all resource kinds, workloads first
    pub fn all() -> &'static [Self] {
        &[
            ResourceKind::Deployment,
            ResourceKind::StatefulSet,
            ResourceKind::CronJob,
            ResourceKind::Job,
            ResourceKind::ConfigMap,
            ResourceKind::Secret,
            ResourceKind::Service,
            ResourceKind::PersistentVolumeClaim,
            ResourceKind::ServiceAccount,
            ResourceKind::Role,
            ResourceKind::RoleBinding,
            ResourceKind::ClusterRole,
            ResourceKind::ClusterRoleBinding,
            ResourceKind::Ingress,
            ResourceKind::Route,
            ResourceKind::NetworkPolicy,
            ResourceKind::HorizontalPodAutoscaler,
        ]
    }

    /// Workload kinds in processing order
    pub fn workloads() -> &'static [Self] {
        &[
            ResourceKind::Deployment,
            ResourceKind::StatefulSet,
            ResourceKind::CronJob,
            ResourceKind::Job,
        ]
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown resource kind: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(
            ResourceKind::parse_optional("StatefulSet"),
            Some(ResourceKind::StatefulSet)
        );
        assert_eq!(ResourceKind::parse_optional("statefulset"), None);
        assert_eq!(ResourceKind::parse_optional("Unknown"), None);
    }

    #[test]
    fn test_all_round_trips_through_as_str() {
        for kind in ResourceKind::all() {
            assert_eq!(ResourceKind::parse_optional(kind.as_str()), Some(*kind));
        }
    }

    #[test]
    fn test_scope_and_workloads() {
        assert!(ResourceKind::ClusterRole.is_cluster_scoped());
        assert!(!ResourceKind::Role.is_cluster_scoped());
        assert!(ResourceKind::Job.is_workload());
        assert!(!ResourceKind::Service.is_workload());
        assert!(ResourceKind::workloads().iter().all(|k| k.is_workload()));
    }
}
