//! Snapshot construction

use super::Snapshot;
use super::filter::{is_managed, should_skip};
use crate::error::{ExportError, ExportResult};
use crate::models::ResourceKind;
use crate::source::ClusterSource;
use futures::{StreamExt, stream};
use serde_json::Value;

/// Default number of concurrent probe/fetch requests
pub const DEFAULT_WORKERS: usize = 10;

/// Builds a [`Snapshot`] from a cluster source
///
/// Every kind is listed once. Each listed name that survives the skip filter
/// is probed for labels and owners, and only unmanaged objects are fetched
/// in full. Up to `workers` candidates of one kind are in flight at a time;
/// the resulting snapshot does not depend on the worker count.
pub struct SnapshotBuilder<'a, S: ClusterSource + ?Sized> {
    source: &'a S,
    namespace: String,
    workers: usize,
}

impl<'a, S: ClusterSource + ?Sized> SnapshotBuilder<'a, S> {
    pub fn new(source: &'a S, namespace: impl Into<String>) -> Self {
        Self {
            source,
            namespace: namespace.into(),
            workers: DEFAULT_WORKERS,
        }
    }

    /// Set the fetch concurrency (at least one)
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Build the snapshot
    ///
    /// Fails only if the namespace does not exist or its existence cannot be
    /// checked; every per-kind or per-resource failure is logged and skipped.
    pub async fn build(&self) -> ExportResult<Snapshot> {
        if !self.source.namespace_exists(&self.namespace).await? {
            return Err(ExportError::NamespaceNotFound(self.namespace.clone()));
        }

        tracing::info!(
            "Caching resources in namespace {} from {} source",
            self.namespace,
            self.source.source_type()
        );

        let mut snapshot = Snapshot::new(self.namespace.clone());
        for kind in ResourceKind::all().iter().copied() {
            let names = match self.source.list_names(kind).await {
                Ok(names) => names,
                Err(e) => {
                    tracing::warn!("Treating {} as empty: {}", kind.plural(), e);
                    continue;
                }
            };

            let candidates: Vec<String> = names
                .into_iter()
                .filter(|name| {
                    let skip = should_skip(kind, name);
                    if skip {
                        tracing::debug!("Skipping system resource {}/{}", kind.plural(), name);
                    }
                    !skip
                })
                .collect();

            let fetched: Vec<Option<(String, Value)>> = stream::iter(candidates)
                .map(|name| self.fetch_candidate(kind, name))
                .buffer_unordered(self.workers)
                .collect()
                .await;

            for (name, obj) in fetched.into_iter().flatten() {
                snapshot.insert(kind, name, obj);
            }
        }

        tracing::info!("Cached {} unmanaged resources", snapshot.len());
        Ok(snapshot)
    }

    async fn fetch_candidate(&self, kind: ResourceKind, name: String) -> Option<(String, Value)> {
        match self.source.probe(kind, &name).await {
            Ok(probe) if is_managed(&probe) => {
                tracing::debug!("Skipping managed resource {}/{}", kind.plural(), name);
                return None;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("Could not probe {}/{}: {}", kind.plural(), name, e);
                return None;
            }
        }

        match self.source.get_object(kind, &name).await {
            Ok(Some(obj)) => Some((name, obj)),
            Ok(None) => {
                tracing::debug!("{}/{} disappeared before fetch", kind.plural(), name);
                None
            }
            Err(e) => {
                tracing::warn!("Could not fetch {}/{}: {}", kind.plural(), name, e);
                None
            }
        }
    }
}
