//! Cluster resource source trait

use crate::error::ExportResult;
use crate::models::ResourceKind;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;

/// Labels and owners of one object, used by the managed filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectProbe {
    pub labels: BTreeMap<String, String>,
    /// Owner references rendered as `Kind/name`
    pub owners: Vec<String>,
}

/// Read access to the resources of one namespace
///
/// Implementations are bound to a namespace at construction; cluster-scoped
/// kinds are listed cluster-wide. Failures are reported per call and the
/// caller decides whether they are fatal.
#[async_trait]
pub trait ClusterSource: Send + Sync {
    /// List all instance names of a kind
    async fn list_names(&self, kind: ResourceKind) -> ExportResult<Vec<String>>;

    /// Fetch only the labels and owner references of an object
    async fn probe(&self, kind: ResourceKind, name: &str) -> ExportResult<ObjectProbe>;

    /// Fetch a full object; `Ok(None)` when it does not exist
    async fn get_object(&self, kind: ResourceKind, name: &str) -> ExportResult<Option<Value>>;

    /// Check that the target namespace exists
    async fn namespace_exists(&self, namespace: &str) -> ExportResult<bool>;

    /// Get source type name
    fn source_type(&self) -> &str;
}
