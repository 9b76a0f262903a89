//! Error types for the materialization engine

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while materializing a project.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Project name is empty or contains characters unusable in a directory name
    #[error("invalid project name: {0:?}")]
    InvalidName(String),

    /// Target directory already exists
    #[error("target directory already exists: {}", .0.display())]
    TargetExists(PathBuf),

    /// Filesystem refused access
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// Remote returned a non-success HTTP status
    #[error("template download failed with HTTP status {status}")]
    RemoteFetchFailed {
        /// Status code returned by the remote
        status: u16,
    },

    /// Archive bytes could not be parsed as a zip
    #[error("malformed template archive: {0}")]
    MalformedArchive(String),

    /// Archive entries share no common root folder
    #[error("template root folder not found in archive")]
    TemplateRootNotFound,

    /// Entry path would resolve outside the target directory
    #[error("archive entry escapes the target directory: {0:?}")]
    PathTraversal(String),

    /// Entry exceeds the per-entry size ceiling
    #[error("archive entry exceeds the size limit: {0:?}")]
    EntryTooLarge(String),

    /// Mirroring a source entry failed
    #[error("failed to copy {}: {source}", .path.display())]
    CopyFailed {
        /// Path of the entry that failed to copy
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Underlying filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network transport failure
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Operation aborted by the cancellation signal
    #[error("operation cancelled")]
    Cancelled,
}
