//! Export error taxonomy
//!
//! Only `NamespaceNotFound` aborts a run. Every other variant is recovered
//! where it happens: logged with `tracing::warn!` and the affected resource
//! or listing is skipped.

use std::path::PathBuf;

/// Export errors
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Cluster source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Failed to parse {kind}/{name}: {reason}")]
    ParseFailure {
        kind: String,
        name: String,
        reason: String,
    },

    #[error("Namespace {0} does not exist")]
    NamespaceNotFound(String),

    #[error("Failed to write {}: {source}", path.display())]
    SinkWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;
