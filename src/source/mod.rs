//! Cluster resource sources
//!
//! Provides the sources a snapshot can be built from:
//! - The live Kubernetes API (most common)
//! - A saved manifest dump (offline runs and tests)

mod cluster;
mod connector;
mod file;

pub use cluster::KubeClusterSource;
pub use connector::{ClusterSource, ObjectProbe};
pub use file::FileClusterSource;
