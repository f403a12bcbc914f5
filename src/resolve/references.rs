//! Direct references from a workload's pod spec

use super::models::ReferencedResources;
use crate::models::ResourceKind;
use crate::models::object::{array_at, name_of, str_at};
use crate::snapshot::Snapshot;
use serde_json::Value;

/// Pod template spec of a workload, if it has one
pub fn pod_spec(workload: &Value, kind: ResourceKind) -> Option<&Value> {
    let pointer = match kind {
        ResourceKind::Deployment | ResourceKind::StatefulSet | ResourceKind::Job => {
            "/spec/template/spec"
        }
        ResourceKind::CronJob => "/spec/jobTemplate/spec/template/spec",
        _ => return None,
    };

    workload
        .pointer(pointer)
        .filter(|spec| spec.as_object().is_some_and(|map| !map.is_empty()))
}

/// Collect the ConfigMaps, Secrets, PVCs and ServiceAccount a workload names
///
/// Reads only the workload object and the PVC names already in `snapshot`.
pub fn extract_references(
    workload: &Value,
    kind: ResourceKind,
    snapshot: &Snapshot,
) -> ReferencedResources {
    let mut refs = ReferencedResources::default();
    let Some(spec) = pod_spec(workload, kind) else {
        return refs;
    };

    let service_account = non_empty(str_at(spec, "/serviceAccountName"))
        .or_else(|| non_empty(str_at(spec, "/serviceAccount")));
    if let Some(sa) = service_account {
        if sa != "default" {
            refs.service_accounts.insert(sa.to_string());
        }
    }

    for volume in array_at(spec, "/volumes") {
        if volume.get("configMap").is_some() {
            insert(&mut refs.config_maps, str_at(volume, "/configMap/name"));
        } else if volume.get("secret").is_some() {
            insert(&mut refs.secrets, str_at(volume, "/secret/secretName"));
        } else if volume.get("persistentVolumeClaim").is_some() {
            insert(
                &mut refs.persistent_volume_claims,
                str_at(volume, "/persistentVolumeClaim/claimName"),
            );
        }
    }

    let containers = array_at(spec, "/containers")
        .iter()
        .chain(array_at(spec, "/initContainers"));
    for container in containers {
        for env in array_at(container, "/env") {
            insert(
                &mut refs.config_maps,
                str_at(env, "/valueFrom/configMapKeyRef/name"),
            );
            insert(&mut refs.secrets, str_at(env, "/valueFrom/secretKeyRef/name"));
        }
        for source in array_at(container, "/envFrom") {
            insert(&mut refs.config_maps, str_at(source, "/configMapRef/name"));
            insert(&mut refs.secrets, str_at(source, "/secretRef/name"));
        }
    }

    if kind == ResourceKind::StatefulSet {
        if let Some(workload_name) = name_of(workload) {
            for template in array_at(workload, "/spec/volumeClaimTemplates") {
                let Some(template_name) = name_of(template) else {
                    continue;
                };
                let prefix = format!("{}-{}-", template_name, workload_name);
                refs.persistent_volume_claims.extend(
                    snapshot
                        .names(ResourceKind::PersistentVolumeClaim)
                        .filter(|pvc| pvc.starts_with(&prefix))
                        .map(str::to_string),
                );
            }
        }
    }

    refs
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

fn insert(set: &mut std::collections::BTreeSet<String>, name: Option<&str>) {
    if let Some(name) = non_empty(name) {
        set.insert(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn deployment(pod_spec: Value) -> Value {
        json!({
            "kind": "Deployment",
            "metadata": {"name": "web"},
            "spec": {"template": {"spec": pod_spec}}
        })
    }

    #[test]
    fn test_volumes_and_env() {
        let workload = deployment(json!({
            "serviceAccountName": "web-sa",
            "volumes": [
                {"name": "cfg", "configMap": {"name": "web-config"}},
                {"name": "tls", "secret": {"secretName": "web-tls"}},
                {"name": "data", "persistentVolumeClaim": {"claimName": "web-data"}},
                {"name": "scratch", "emptyDir": {}}
            ],
            "containers": [{
                "name": "app",
                "env": [
                    {"name": "A", "valueFrom": {"configMapKeyRef": {"name": "flags", "key": "a"}}},
                    {"name": "B", "valueFrom": {"secretKeyRef": {"name": "db-credentials", "key": "pw"}}},
                    {"name": "C", "value": "plain"}
                ],
                "envFrom": [{"configMapRef": {"name": "web-config"}}]
            }],
            "initContainers": [{
                "name": "init",
                "envFrom": [{"secretRef": {"name": "init-secret"}}]
            }]
        }));

        let refs = extract_references(&workload, ResourceKind::Deployment, &Snapshot::new("shop"));
        assert_eq!(
            refs.config_maps.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["flags", "web-config"]
        );
        assert_eq!(
            refs.secrets.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["db-credentials", "init-secret", "web-tls"]
        );
        assert!(refs.persistent_volume_claims.contains("web-data"));
        assert!(refs.service_accounts.contains("web-sa"));
    }

    #[test]
    fn test_default_service_account_ignored() {
        let workload = deployment(json!({"serviceAccountName": "default", "containers": []}));
        let refs = extract_references(&workload, ResourceKind::Deployment, &Snapshot::new("shop"));
        assert!(refs.service_accounts.is_empty());

        let legacy = deployment(json!({"serviceAccount": "legacy-sa", "containers": []}));
        let refs = extract_references(&legacy, ResourceKind::Deployment, &Snapshot::new("shop"));
        assert!(refs.service_accounts.contains("legacy-sa"));
    }

    #[test]
    fn test_cronjob_pod_spec_path() {
        let cronjob = json!({
            "kind": "CronJob",
            "metadata": {"name": "report"},
            "spec": {"jobTemplate": {"spec": {"template": {"spec": {
                "volumes": [{"name": "cfg", "configMap": {"name": "report-config"}}]
            }}}}}
        });
        let refs = extract_references(&cronjob, ResourceKind::CronJob, &Snapshot::new("shop"));
        assert!(refs.config_maps.contains("report-config"));

        // The Deployment path does not apply to CronJobs
        let refs = extract_references(&cronjob, ResourceKind::Deployment, &Snapshot::new("shop"));
        assert!(refs.is_empty());
    }

    #[test]
    fn test_missing_pod_spec_is_empty() {
        let workload = json!({"kind": "Deployment", "metadata": {"name": "web"}, "spec": {}});
        let refs = extract_references(&workload, ResourceKind::Deployment, &Snapshot::new("shop"));
        assert!(refs.is_empty());
    }

    #[test]
    fn test_statefulset_pvc_inference() {
        let mut snapshot = Snapshot::new("shop");
        for pvc in ["data-db-0", "data-db-1", "other-pvc", "data-dbx-0"] {
            snapshot.insert(ResourceKind::PersistentVolumeClaim, pvc, json!({}));
        }
        let statefulset = json!({
            "kind": "StatefulSet",
            "metadata": {"name": "db"},
            "spec": {
                "template": {"spec": {"containers": [{"name": "db"}]}},
                "volumeClaimTemplates": [{"metadata": {"name": "data"}}]
            }
        });

        let refs = extract_references(&statefulset, ResourceKind::StatefulSet, &snapshot);
        assert_eq!(
            refs.persistent_volume_claims
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>(),
            vec!["data-db-0", "data-db-1"]
        );
    }
}
