//! Run summary

use crate::models::ResourceRef;
use std::fmt;
use std::path::PathBuf;

/// Resources grouped under one workload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadSummary {
    pub name: String,
    pub resources: Vec<ResourceRef>,
}

/// Outcome of one export run
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    pub namespace: String,
    /// `None` on a dry run
    pub export_dir: Option<PathBuf>,
    pub workloads: Vec<WorkloadSummary>,
    /// Writes that failed and were skipped
    pub failed_writes: usize,
}

impl ExportSummary {
    pub fn is_empty(&self) -> bool {
        self.workloads.is_empty()
    }

    /// Total resources across all workloads, counting shared ones per workload
    pub fn resource_count(&self) -> usize {
        self.workloads.iter().map(|w| w.resources.len()).sum()
    }
}

impl fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Export Summary:")?;
        if self.workloads.is_empty() {
            return writeln!(f, "No unmanaged workloads found.");
        }

        for workload in &self.workloads {
            writeln!(f, "{} ({} resources)", workload.name, workload.resources.len())?;
            for resource in &workload.resources {
                writeln!(f, "  • {}", resource)?;
            }
        }
        if let Some(dir) = &self.export_dir {
            writeln!(f, "Exported to {}", dir.display())?;
        }
        Ok(())
    }
}
