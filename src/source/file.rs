//! File-backed cluster source
//!
//! Serves the `ClusterSource` contract from a saved manifest dump, either a
//! multi-document YAML stream or a `kind: List` document as produced by
//! `kubectl get -o yaml`. Used for offline exports and deterministic tests.

use super::connector::{ClusterSource, ObjectProbe};
use crate::error::{ExportError, ExportResult};
use crate::models::ResourceKind;
use crate::models::object::{kind_of, name_of, namespace_of, string_map};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// In-memory source built from a list of objects
#[derive(Debug, Clone, Default)]
pub struct FileClusterSource {
    namespace: String,
    objects: BTreeMap<ResourceKind, BTreeMap<String, Value>>,
    namespaces: BTreeSet<String>,
    /// A namespaced object without `metadata.namespace` was loaded
    has_unscoped: bool,
}

impl FileClusterSource {
    /// Build a source for `namespace` from already-parsed objects
    ///
    /// Namespaced objects from other namespaces are dropped; objects of
    /// kinds the grouper does not handle are ignored.
    pub fn from_objects(
        namespace: impl Into<String>,
        objects: impl IntoIterator<Item = Value>,
    ) -> Self {
        let mut source = Self {
            namespace: namespace.into(),
            ..Default::default()
        };
        for obj in objects {
            source.add(obj);
        }
        source
    }

    /// Parse a YAML dump
    pub fn from_yaml_str(namespace: impl Into<String>, contents: &str) -> Result<Self> {
        let mut objects = Vec::new();
        for (idx, document) in serde_yaml::Deserializer::from_str(contents).enumerate() {
            let value = Value::deserialize(document)
                .with_context(|| format!("Failed to parse YAML document {}", idx))?;
            if !value.is_null() {
                objects.push(value);
            }
        }
        Ok(Self::from_objects(namespace, objects))
    }

    /// Read and parse a YAML dump from disk
    pub async fn load(namespace: impl Into<String>, path: &Path) -> Result<Self> {
        tracing::debug!("Reading manifest dump from {:?}", path);

        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read file: {:?}", path))?;

        let source = Self::from_yaml_str(namespace, &contents)
            .with_context(|| format!("Failed to parse manifest dump: {:?}", path))?;

        tracing::debug!(
            "Loaded {} objects from {:?}",
            source.objects.values().map(BTreeMap::len).sum::<usize>(),
            path
        );
        Ok(source)
    }

    fn add(&mut self, mut obj: Value) {
        let kind_name = kind_of(&obj).unwrap_or_default().to_string();

        if kind_name == "List" {
            if let Some(Value::Array(items)) = obj.get_mut("items").map(Value::take) {
                for item in items {
                    self.add(item);
                }
            }
            return;
        }

        if kind_name == "Namespace" {
            if let Some(name) = name_of(&obj) {
                self.namespaces.insert(name.to_string());
            }
            return;
        }

        let Some(kind) = ResourceKind::parse_optional(&kind_name) else {
            tracing::debug!("Ignoring object of unhandled kind '{}'", kind_name);
            return;
        };

        let Some(name) = name_of(&obj).map(str::to_string) else {
            tracing::warn!("Skipping {} without metadata.name", kind.plural());
            return;
        };

        if !kind.is_cluster_scoped() {
            match namespace_of(&obj) {
                Some(ns) => {
                    self.namespaces.insert(ns.to_string());
                    if ns != self.namespace {
                        return;
                    }
                }
                None => self.has_unscoped = true,
            }
        }

        self.objects.entry(kind).or_default().insert(name, obj);
    }

    fn lookup(&self, kind: ResourceKind, name: &str) -> Option<&Value> {
        self.objects.get(&kind).and_then(|by_name| by_name.get(name))
    }
}

#[async_trait]
impl ClusterSource for FileClusterSource {
    async fn list_names(&self, kind: ResourceKind) -> ExportResult<Vec<String>> {
        Ok(self
            .objects
            .get(&kind)
            .map(|by_name| by_name.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn probe(&self, kind: ResourceKind, name: &str) -> ExportResult<ObjectProbe> {
        let obj = self.lookup(kind, name).ok_or_else(|| {
            ExportError::SourceUnavailable(format!("{}/{} not in dump", kind.plural(), name))
        })?;

        let owners = obj
            .pointer("/metadata/ownerReferences")
            .and_then(Value::as_array)
            .map(|refs| {
                refs.iter()
                    .map(|owner| {
                        format!(
                            "{}/{}",
                            owner.get("kind").and_then(Value::as_str).unwrap_or_default(),
                            owner.get("name").and_then(Value::as_str).unwrap_or_default()
                        )
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(ObjectProbe {
            labels: string_map(obj.pointer("/metadata/labels")),
            owners,
        })
    }

    async fn get_object(&self, kind: ResourceKind, name: &str) -> ExportResult<Option<Value>> {
        Ok(self.lookup(kind, name).cloned())
    }

    async fn namespace_exists(&self, namespace: &str) -> ExportResult<bool> {
        Ok(self.has_unscoped || self.namespaces.contains(namespace))
    }

    fn source_type(&self) -> &str {
        "file"
    }
}
