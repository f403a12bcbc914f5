//! kgrouper library
//!
//! Exports the unmanaged resources of a Kubernetes namespace grouped by the
//! workload they belong to. The binary is a thin wrapper around
//! [`ExportService`]; everything here can also be driven directly, for
//! example with a [`FileClusterSource`] in tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod kube;
pub mod models;
pub mod resolve;
pub mod sanitize;
pub mod services;
pub mod snapshot;
pub mod source;

// Re-export commonly used types for convenience
pub use error::{ExportError, ExportResult};
pub use export::{ArtifactSink, DirectorySink, ExportSummary};
pub use models::{ResourceKind, ResourceRef};
pub use resolve::{WorkloadClosure, build_all_closures, build_closure};
pub use services::ExportService;
pub use snapshot::{Snapshot, SnapshotBuilder};
pub use source::{ClusterSource, FileClusterSource, KubeClusterSource};
