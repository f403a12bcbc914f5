//! Export service
//!
//! Runs the whole pipeline for one namespace: build the snapshot, resolve
//! every workload closure, sanitize each member and hand it to the sink.

use crate::error::ExportResult;
use crate::export::{ArtifactSink, ExportSummary, WorkloadSummary};
use crate::resolve::build_all_closures;
use crate::sanitize;
use crate::snapshot::{DEFAULT_WORKERS, Snapshot, SnapshotBuilder};
use crate::source::ClusterSource;

/// Service grouping unmanaged resources per workload
pub struct ExportService {
    source: Box<dyn ClusterSource>,
    workers: usize,
    dry_run: bool,
}

impl ExportService {
    pub fn new(source: Box<dyn ClusterSource>) -> Self {
        Self {
            source,
            workers: DEFAULT_WORKERS,
            dry_run: false,
        }
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Resolve closures without writing anything
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Build the snapshot of `namespace`
    pub async fn snapshot(&self, namespace: &str) -> ExportResult<Snapshot> {
        SnapshotBuilder::new(self.source.as_ref(), namespace)
            .workers(self.workers)
            .build()
            .await
    }

    /// Snapshot `namespace` and export every workload closure to `sink`
    ///
    /// Only a missing namespace aborts the run. Failed writes are logged,
    /// counted in the summary and otherwise skipped.
    pub async fn export(
        &self,
        namespace: &str,
        sink: &dyn ArtifactSink,
    ) -> ExportResult<ExportSummary> {
        let snapshot = self.snapshot(namespace).await?;
        Ok(self.export_snapshot(&snapshot, sink))
    }

    /// Export the closures of an already built snapshot
    pub fn export_snapshot(&self, snapshot: &Snapshot, sink: &dyn ArtifactSink) -> ExportSummary {
        let mut summary = ExportSummary {
            namespace: snapshot.namespace().to_string(),
            ..Default::default()
        };

        for closure in build_all_closures(snapshot) {
            let workload = closure.workload();
            if self.dry_run {
                tracing::info!("Processing {}", workload);
            }

            if !self.dry_run {
                for member in closure.members() {
                    let Some(obj) = snapshot.get(member.kind, &member.name) else {
                        continue;
                    };
                    let cleaned = sanitize::clean(obj);
                    if let Err(e) = sink.write(&workload.name, member, &cleaned) {
                        tracing::warn!("Could not save {}: {}", member, e);
                        summary.failed_writes += 1;
                    }
                }
            }

            summary.workloads.push(WorkloadSummary {
                name: workload.name.clone(),
                resources: closure.members().to_vec(),
            });
        }

        tracing::info!(
            "Grouped {} resources under {} workloads",
            summary.resource_count(),
            summary.workloads.len()
        );
        summary
    }
}
