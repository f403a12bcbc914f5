//! Data structures for resolver results

use crate::models::ResourceKind;
use std::collections::BTreeSet;

/// Position of a dependent inside a closure
///
/// Closures list their members in exactly this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Workload,
    ConfigMaps,
    Secrets,
    PersistentVolumeClaims,
    ServiceAccounts,
    Roles,
    RoleBindings,
    ClusterRoles,
    ClusterRoleBindings,
    Services,
    Routes,
    Autoscalers,
    NetworkPolicies,
}

impl Category {
    pub const ORDER: [Category; 13] = [
        Category::Workload,
        Category::ConfigMaps,
        Category::Secrets,
        Category::PersistentVolumeClaims,
        Category::ServiceAccounts,
        Category::Roles,
        Category::RoleBindings,
        Category::ClusterRoles,
        Category::ClusterRoleBindings,
        Category::Services,
        Category::Routes,
        Category::Autoscalers,
        Category::NetworkPolicies,
    ];

    /// Category a kind is listed under
    pub fn of(kind: ResourceKind) -> Category {
        match kind {
            ResourceKind::Deployment
            | ResourceKind::StatefulSet
            | ResourceKind::CronJob
            | ResourceKind::Job => Category::Workload,
            ResourceKind::ConfigMap => Category::ConfigMaps,
            ResourceKind::Secret => Category::Secrets,
            ResourceKind::PersistentVolumeClaim => Category::PersistentVolumeClaims,
            ResourceKind::ServiceAccount => Category::ServiceAccounts,
            ResourceKind::Role => Category::Roles,
            ResourceKind::RoleBinding => Category::RoleBindings,
            ResourceKind::ClusterRole => Category::ClusterRoles,
            ResourceKind::ClusterRoleBinding => Category::ClusterRoleBindings,
            ResourceKind::Service => Category::Services,
            ResourceKind::Ingress | ResourceKind::Route => Category::Routes,
            ResourceKind::HorizontalPodAutoscaler => Category::Autoscalers,
            ResourceKind::NetworkPolicy => Category::NetworkPolicies,
        }
    }
}

/// Resources a workload's pod spec names directly
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferencedResources {
    pub config_maps: BTreeSet<String>,
    pub secrets: BTreeSet<String>,
    pub persistent_volume_claims: BTreeSet<String>,
    pub service_accounts: BTreeSet<String>,
}

impl ReferencedResources {
    /// Sets paired with their kind, in closure order
    pub fn in_category_order(&self) -> [(ResourceKind, &BTreeSet<String>); 4] {
        [
            (ResourceKind::ConfigMap, &self.config_maps),
            (ResourceKind::Secret, &self.secrets),
            (ResourceKind::PersistentVolumeClaim, &self.persistent_volume_claims),
            (ResourceKind::ServiceAccount, &self.service_accounts),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.in_category_order()
            .iter()
            .all(|(_, names)| names.is_empty())
    }
}

/// RBAC objects granting permissions to one ServiceAccount
///
/// Each list is free of duplicates and keeps discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RbacResources {
    pub roles: Vec<String>,
    pub role_bindings: Vec<String>,
    pub cluster_roles: Vec<String>,
    pub cluster_role_bindings: Vec<String>,
}

impl RbacResources {
    /// Lists paired with their kind, in closure order
    pub fn in_category_order(&self) -> [(ResourceKind, &[String]); 4] {
        [
            (ResourceKind::Role, self.roles.as_slice()),
            (ResourceKind::RoleBinding, self.role_bindings.as_slice()),
            (ResourceKind::ClusterRole, self.cluster_roles.as_slice()),
            (ResourceKind::ClusterRoleBinding, self.cluster_role_bindings.as_slice()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.in_category_order()
            .iter()
            .all(|(_, names)| names.is_empty())
    }
}

/// Append `name` unless already present
pub(crate) fn push_unique(list: &mut Vec<String>, name: &str) {
    if !list.iter().any(|existing| existing == name) {
        list.push(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_order_is_sorted() {
        let mut sorted = Category::ORDER;
        sorted.sort();
        assert_eq!(sorted, Category::ORDER);
    }

    #[test]
    fn test_every_kind_has_a_category() {
        for kind in ResourceKind::all() {
            let category = Category::of(*kind);
            assert!(Category::ORDER.contains(&category));
        }
        assert_eq!(Category::of(ResourceKind::Ingress), Category::Routes);
        assert_eq!(Category::of(ResourceKind::Route), Category::Routes);
    }

    #[test]
    fn test_push_unique() {
        let mut list = Vec::new();
        push_unique(&mut list, "a");
        push_unique(&mut list, "b");
        push_unique(&mut list, "a");
        assert_eq!(list, vec!["a".to_string(), "b".to_string()]);
    }
}
