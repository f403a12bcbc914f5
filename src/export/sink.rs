//! Artifact sinks

use crate::error::{ExportError, ExportResult};
use crate::models::ResourceRef;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Destination for cleaned manifests
pub trait ArtifactSink: Send + Sync {
    /// Store one cleaned resource under the given workload group
    fn write(&self, workload: &str, resource: &ResourceRef, obj: &Value) -> ExportResult<()>;
}

/// Writes `<root>/<workload>/<plural>-<name>.yaml`
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// File a resource is written to
    pub fn path_for(&self, workload: &str, resource: &ResourceRef) -> PathBuf {
        self.root
            .join(workload)
            .join(format!("{}.yaml", resource.file_stem()))
    }
}

impl ArtifactSink for DirectorySink {
    fn write(&self, workload: &str, resource: &ResourceRef, obj: &Value) -> ExportResult<()> {
        let path = self.path_for(workload, resource);
        let dir = self.root.join(workload);
        fs::create_dir_all(&dir).map_err(|source| ExportError::SinkWriteFailure {
            path: dir.clone(),
            source,
        })?;

        let yaml = serde_yaml::to_string(obj).map_err(|e| ExportError::SinkWriteFailure {
            path: path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;

        fs::write(&path, yaml).map_err(|source| ExportError::SinkWriteFailure {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResourceKind;
    use serde_json::json;

    #[test]
    fn test_path_layout() {
        let sink = DirectorySink::new("/tmp/out");
        let path = sink.path_for("web", &ResourceRef::new(ResourceKind::ConfigMap, "web-config"));
        assert_eq!(path, PathBuf::from("/tmp/out/web/configmaps-web-config.yaml"));
    }

    #[test]
    fn test_write_creates_workload_dir() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path());
        let resource = ResourceRef::new(ResourceKind::Service, "web");

        sink.write("web", &resource, &json!({"kind": "Service", "metadata": {"name": "web"}}))
            .unwrap();

        let written = fs::read_to_string(dir.path().join("web/services-web.yaml")).unwrap();
        assert!(written.contains("kind: Service"));
        assert!(written.contains("name: web"));
    }
}
