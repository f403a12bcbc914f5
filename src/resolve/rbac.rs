//! RBAC resolution for a ServiceAccount

use super::models::{RbacResources, push_unique};
use crate::models::ResourceKind;
use crate::models::object::{array_at, str_at};
use crate::snapshot::Snapshot;
use serde_json::Value;

/// Bindings naming `service_account` as a subject, and the roles they grant
///
/// A referenced Role is kept only if it is in the snapshot. ClusterRoles are
/// kept by name, since the skip filter may have left them out of the cache.
pub fn resolve_rbac(service_account: &str, snapshot: &Snapshot) -> RbacResources {
    let namespace = snapshot.namespace();
    let mut rbac = RbacResources::default();

    for (name, binding) in snapshot.objects(ResourceKind::RoleBinding) {
        if !binds_service_account(binding, service_account, namespace) {
            continue;
        }
        push_unique(&mut rbac.role_bindings, name);

        match role_ref(binding) {
            Some(("Role", role)) => {
                if snapshot.contains(ResourceKind::Role, role) {
                    push_unique(&mut rbac.roles, role);
                } else {
                    tracing::debug!("RoleBinding {} references missing Role {}", name, role);
                }
            }
            Some(("ClusterRole", role)) => push_unique(&mut rbac.cluster_roles, role),
            _ => {}
        }
    }

    for (name, binding) in snapshot.objects(ResourceKind::ClusterRoleBinding) {
        if !binds_service_account(binding, service_account, namespace) {
            continue;
        }
        push_unique(&mut rbac.cluster_role_bindings, name);

        if let Some(("ClusterRole", role)) = role_ref(binding) {
            push_unique(&mut rbac.cluster_roles, role);
        }
    }

    rbac
}

/// A subject without a namespace is taken to be in `namespace`
fn binds_service_account(binding: &Value, service_account: &str, namespace: &str) -> bool {
    array_at(binding, "/subjects").iter().any(|subject| {
        str_at(subject, "/kind") == Some("ServiceAccount")
            && str_at(subject, "/name") == Some(service_account)
            && str_at(subject, "/namespace").unwrap_or(namespace) == namespace
    })
}

/// `(roleRef.kind, roleRef.name)`
fn role_ref(binding: &Value) -> Option<(&str, &str)> {
    Some((
        str_at(binding, "/roleRef/kind")?,
        str_at(binding, "/roleRef/name")?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn binding(subject: Value, role_kind: &str, role: &str) -> Value {
        json!({
            "subjects": [subject],
            "roleRef": {"apiGroup": "rbac.authorization.k8s.io", "kind": role_kind, "name": role}
        })
    }

    #[test]
    fn test_role_binding_without_subject_namespace() {
        let mut snapshot = Snapshot::new("shop");
        snapshot.insert(
            ResourceKind::RoleBinding,
            "rb1",
            binding(json!({"kind": "ServiceAccount", "name": "svc-a"}), "Role", "role1"),
        );
        snapshot.insert(ResourceKind::Role, "role1", json!({}));

        let rbac = resolve_rbac("svc-a", &snapshot);
        assert_eq!(rbac.roles, vec!["role1".to_string()]);
        assert_eq!(rbac.role_bindings, vec!["rb1".to_string()]);
        assert!(rbac.cluster_roles.is_empty());
    }

    #[test]
    fn test_dangling_role_dropped() {
        let mut snapshot = Snapshot::new("shop");
        snapshot.insert(
            ResourceKind::RoleBinding,
            "rb1",
            binding(json!({"kind": "ServiceAccount", "name": "svc-a"}), "Role", "role1"),
        );

        let rbac = resolve_rbac("svc-a", &snapshot);
        assert!(rbac.roles.is_empty());
        assert_eq!(rbac.role_bindings, vec!["rb1".to_string()]);
    }

    #[test]
    fn test_subject_in_other_namespace_ignored() {
        let mut snapshot = Snapshot::new("shop");
        snapshot.insert(
            ResourceKind::RoleBinding,
            "rb1",
            binding(
                json!({"kind": "ServiceAccount", "name": "svc-a", "namespace": "billing"}),
                "ClusterRole",
                "reader",
            ),
        );
        snapshot.insert(
            ResourceKind::RoleBinding,
            "rb2",
            binding(json!({"kind": "User", "name": "svc-a"}), "ClusterRole", "reader"),
        );

        assert!(resolve_rbac("svc-a", &snapshot).is_empty());
    }

    #[test]
    fn test_cluster_role_deduplicated() {
        let mut snapshot = Snapshot::new("shop");
        let subject = json!({"kind": "ServiceAccount", "name": "svc-a", "namespace": "shop"});
        snapshot.insert(
            ResourceKind::RoleBinding,
            "rb1",
            binding(subject.clone(), "ClusterRole", "reader"),
        );
        snapshot.insert(
            ResourceKind::ClusterRoleBinding,
            "crb1",
            binding(subject, "ClusterRole", "reader"),
        );

        let rbac = resolve_rbac("svc-a", &snapshot);
        assert_eq!(rbac.cluster_roles, vec!["reader".to_string()]);
        assert_eq!(rbac.role_bindings, vec!["rb1".to_string()]);
        assert_eq!(rbac.cluster_role_bindings, vec!["crb1".to_string()]);
    }
}
