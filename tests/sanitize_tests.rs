//! Manifest sanitizer tests

use insta::assert_snapshot;
use kgrouper::sanitize::{CleanRuleSet, DEFAULT_RULES, clean, clean_with};
use serde_json::{Value, json};

fn live_service() -> Value {
    json!({
        "apiVersion": "v1",
        "kind": "Service",
        "metadata": {
            "name": "web",
            "namespace": "shop",
            "uid": "8d4c1f0e-5b7a-4c1e-9a51-2f1f7b0f9c11",
            "resourceVersion": "48213",
            "creationTimestamp": "2024-05-01T10:00:00Z",
            "labels": {"app": "web"},
            "annotations": {
                "kubectl.kubernetes.io/last-applied-configuration": "{\"apiVersion\":\"v1\"}",
                "team": "payments"
            },
            "managedFields": [{"manager": "kubectl", "operation": "Update"}]
        },
        "spec": {
            "type": "NodePort",
            "clusterIP": "10.0.0.5",
            "clusterIPs": ["10.0.0.5"],
            "ipFamilies": ["IPv4"],
            "ipFamilyPolicy": "SingleStack",
            "externalTrafficPolicy": "Cluster",
            "selector": {"app": "web"},
            "ports": [
                {"name": "http", "port": 80, "targetPort": 8080, "protocol": "TCP", "nodePort": 31000}
            ]
        },
        "status": {"loadBalancer": {}}
    })
}

fn bound_claim() -> Value {
    json!({
        "apiVersion": "v1",
        "kind": "PersistentVolumeClaim",
        "metadata": {
            "name": "web-data",
            "finalizers": ["kubernetes.io/pvc-protection"],
            "annotations": {
                "pv.kubernetes.io/bind-completed": "yes",
                "pv.kubernetes.io/bound-by-controller": "yes",
                "volume.kubernetes.io/storage-provisioner": "ebs.csi.aws.com"
            },
            "labels": {}
        },
        "spec": {
            "accessModes": ["ReadWriteOnce"],
            "resources": {"requests": {"storage": "10Gi"}},
            "volumeName": "pvc-4f1c"
        },
        "status": {"phase": "Bound"}
    })
}

#[test]
fn test_service_rendered() {
    let yaml = serde_yaml::to_string(&clean(&live_service())).unwrap();
    assert_snapshot!(yaml, @r"
    apiVersion: v1
    kind: Service
    metadata:
      name: web
      namespace: shop
      labels:
        app: web
      annotations:
        team: payments
    spec:
      type: NodePort
      selector:
        app: web
      ports:
      - name: http
        port: 80
        targetPort: 8080
        protocol: TCP
    ");
}

#[test]
fn test_bound_claim_loses_binding_details() {
    let cleaned = clean(&bound_claim());
    assert_eq!(
        cleaned,
        json!({
            "apiVersion": "v1",
            "kind": "PersistentVolumeClaim",
            "metadata": {"name": "web-data"},
            "spec": {
                "accessModes": ["ReadWriteOnce"],
                "resources": {"requests": {"storage": "10Gi"}}
            }
        })
    );
}

#[test]
fn test_clean_is_idempotent() {
    for obj in [live_service(), bound_claim(), json!({}), json!({"metadata": {}})] {
        let once = clean(&obj);
        assert_eq!(clean(&once), once);
    }
}

#[test]
fn test_shared_object_cleans_identically() {
    let cached = live_service();
    let first = clean(&cached);
    let second = clean(&cached);

    assert_eq!(first, second);
    assert_eq!(cached, live_service());
}

#[test]
fn test_custom_rules() {
    let rules = CleanRuleSet {
        spec: &["type"],
        ..DEFAULT_RULES
    };
    let cleaned = clean_with(&live_service(), &rules);
    assert!(cleaned["spec"].get("type").is_none());
    assert_eq!(cleaned["spec"]["clusterIP"], "10.0.0.5");
    assert!(cleaned.get("status").is_none());
}
