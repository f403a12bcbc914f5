//! Export output: artifact sinks and the run summary

mod sink;
mod summary;

pub use sink::{ArtifactSink, DirectorySink};
pub use summary::{ExportSummary, WorkloadSummary};

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// `<output_dir>/<namespace>-grouped-<YYYY-MM-DD_HH-MM-SS>`
pub fn export_dir_name(output_dir: &Path, namespace: &str, at: DateTime<Local>) -> PathBuf {
    output_dir.join(format!(
        "{}-grouped-{}",
        namespace,
        at.format("%Y-%m-%d_%H-%M-%S")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_export_dir_name() {
        let at = Local
            .with_ymd_and_hms(2024, 3, 9, 7, 5, 1)
            .single()
            .unwrap();
        assert_eq!(
            export_dir_name(Path::new("out"), "shop", at),
            PathBuf::from("out/shop-grouped-2024-03-09_07-05-01")
        );
    }
}
