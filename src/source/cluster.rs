//! Live cluster source backed by the Kubernetes API

use super::connector::{ClusterSource, ObjectProbe};
use crate::error::{ExportError, ExportResult};
use crate::models::ResourceKind;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Namespace;
use kube::api::ListParams;
use kube::core::DynamicObject;
use kube::{Api, Client};
use serde_json::Value;

/// Kubernetes API source
///
/// Lists with `list_metadata` and probes with `get_metadata` so that objects
/// rejected by the managed filter are never transferred in full.
pub struct KubeClusterSource {
    client: Client,
    namespace: String,
}

impl KubeClusterSource {
    pub fn new(client: Client, namespace: impl Into<String>) -> Self {
        Self {
            client,
            namespace: namespace.into(),
        }
    }

    fn api(&self, kind: ResourceKind) -> Api<DynamicObject> {
        let api_resource = crate::kube::api_resource(kind);
        if kind.is_cluster_scoped() {
            Api::all_with(self.client.clone(), &api_resource)
        } else {
            Api::namespaced_with(self.client.clone(), &self.namespace, &api_resource)
        }
    }
}

fn unavailable(action: &str, kind: ResourceKind, name: &str, e: kube::Error) -> ExportError {
    ExportError::SourceUnavailable(format!("{} {}/{}: {}", action, kind.plural(), name, e))
}

#[async_trait]
impl ClusterSource for KubeClusterSource {
    async fn list_names(&self, kind: ResourceKind) -> ExportResult<Vec<String>> {
        let list = self
            .api(kind)
            .list_metadata(&ListParams::default())
            .await
            .map_err(|e| {
                ExportError::SourceUnavailable(format!("list {}: {}", kind.plural(), e))
            })?;

        Ok(list
            .items
            .into_iter()
            .filter_map(|item| item.metadata.name)
            .collect())
    }

    async fn probe(&self, kind: ResourceKind, name: &str) -> ExportResult<ObjectProbe> {
        let meta = self
            .api(kind)
            .get_metadata(name)
            .await
            .map_err(|e| unavailable("probe", kind, name, e))?;

        let owners = meta
            .metadata
            .owner_references
            .unwrap_or_default()
            .into_iter()
            .map(|owner| format!("{}/{}", owner.kind, owner.name))
            .collect();

        Ok(ObjectProbe {
            labels: meta.metadata.labels.unwrap_or_default(),
            owners,
        })
    }

    async fn get_object(&self, kind: ResourceKind, name: &str) -> ExportResult<Option<Value>> {
        let obj = match self.api(kind).get_opt(name).await {
            Ok(Some(obj)) => obj,
            Ok(None) => return Ok(None),
            Err(kube::Error::SerdeError(e)) => {
                return Err(ExportError::ParseFailure {
                    kind: kind.plural().to_string(),
                    name: name.to_string(),
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(unavailable("get", kind, name, e)),
        };

        serde_json::to_value(&obj)
            .map(Some)
            .map_err(|e| ExportError::ParseFailure {
                kind: kind.plural().to_string(),
                name: name.to_string(),
                reason: e.to_string(),
            })
    }

    async fn namespace_exists(&self, namespace: &str) -> ExportResult<bool> {
        let api: Api<Namespace> = Api::all(self.client.clone());
        api.get_opt(namespace)
            .await
            .map(|ns| ns.is_some())
            .map_err(|e| {
                ExportError::SourceUnavailable(format!("get namespace {}: {}", namespace, e))
            })
    }

    fn source_type(&self) -> &str {
        "kubernetes"
    }
}
