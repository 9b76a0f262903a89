//! Generation orchestration
//!
//! Composes target allocation with exactly one acquisition strategy and
//! reports a single outcome. There is no retry and no rollback: a failure
//! after allocation leaves the target directory partially populated, which
//! the caller is expected to surface to the user.

use std::env;
use std::fmt;
use std::io::Seek;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::archive::extract_archive;
use crate::error::GenerateError;
use crate::fetch::fetch_archive;
use crate::mirror::mirror_tree;
use crate::path::allocate_target;
use crate::skeleton::synthesize_skeleton;

/// Where the template content comes from.
#[derive(Debug, Clone)]
pub enum TemplateSource {
    /// Download a zip archive and unpack it into the target
    RemoteArchive {
        /// Archive URL
        url: String,
    },
    /// Mirror an existing local template directory
    LocalTree {
        /// Template directory
        path: PathBuf,
    },
    /// Synthesize the built-in skeleton, no archive involved
    Skeleton,
}

/// One project-generation request, consumed by a single [`Generator::run`].
#[derive(Debug, Clone)]
pub struct ProjectRequest {
    /// Project name; becomes the target directory name
    pub name: String,
    /// Acquisition strategy
    pub source: TemplateSource,
}

/// Phase a generation failure occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Target directory validation and creation
    Allocation,
    /// Archive download
    Fetch,
    /// Archive unpacking
    Extraction,
    /// Local tree copy
    Mirroring,
    /// Skeleton synthesis
    Synthesis,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self {
            Self::Allocation => "allocation",
            Self::Fetch => "fetch",
            Self::Extraction => "extraction",
            Self::Mirroring => "mirroring",
            Self::Synthesis => "synthesis",
        };
        f.write_str(phase)
    }
}

/// A [`GenerateError`] wrapped with the phase it occurred in.
#[derive(Debug, thiserror::Error)]
#[error("{phase} failed: {source}")]
pub struct PhaseError {
    /// Phase the failure occurred in
    pub phase: Phase,
    /// Underlying failure
    #[source]
    pub source: GenerateError,
}

impl PhaseError {
    const fn new(phase: Phase, source: GenerateError) -> Self {
        Self { phase, source }
    }
}

/// Outcome of one generation run, constructed once and then immutable.
#[derive(Debug)]
pub struct GenerationReport {
    /// Resolved target path; `None` only when allocation itself failed
    pub target_path: Option<PathBuf>,
    /// Success, or the failure wrapped with its phase
    pub outcome: Result<(), PhaseError>,
}

impl GenerationReport {
    /// Whether the run materialized the full project.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Composes [`allocate_target`] with one acquisition strategy.
pub struct Generator {
    base_dir: PathBuf,
}

impl Generator {
    /// Generator rooted at the current working directory.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Io`] if the working directory cannot be
    /// resolved.
    pub fn new() -> Result<Self, GenerateError> {
        Ok(Self {
            base_dir: env::current_dir()?,
        })
    }

    /// Generator rooted at an explicit base directory.
    #[must_use]
    pub const fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Run one generation request to completion.
    ///
    /// A failure after allocation leaves the target directory on disk in a
    /// partially populated state; the report still carries its path so the
    /// caller can name it.
    pub async fn run(
        &self,
        request: &ProjectRequest,
        cancel: &CancellationToken,
    ) -> GenerationReport {
        let target = match allocate_target(&self.base_dir, &request.name) {
            Ok(target) => target,
            Err(e) => {
                return GenerationReport {
                    target_path: None,
                    outcome: Err(PhaseError::new(Phase::Allocation, e)),
                }
            }
        };

        let outcome = materialize(&request.source, &target, cancel).await;
        if outcome.is_ok() {
            info!(target = %target.display(), "project generated");
        }

        GenerationReport {
            target_path: Some(target),
            outcome,
        }
    }
}

/// Apply one acquisition strategy to an allocated target directory.
async fn materialize(
    source: &TemplateSource,
    target: &Path,
    cancel: &CancellationToken,
) -> Result<(), PhaseError> {
    match source {
        TemplateSource::RemoteArchive { url } => {
            // The temp buffer is removed when dropped, success or failure.
            let mut buffer = NamedTempFile::new()
                .map_err(|e| PhaseError::new(Phase::Fetch, GenerateError::Io(e)))?;

            fetch_archive(url, buffer.as_file_mut(), cancel)
                .await
                .map_err(|e| PhaseError::new(Phase::Fetch, e))?;

            let file = buffer.as_file_mut();
            file.rewind()
                .map_err(|e| PhaseError::new(Phase::Extraction, GenerateError::Io(e)))?;
            extract_archive(file, target).map_err(|e| PhaseError::new(Phase::Extraction, e))
        }
        TemplateSource::LocalTree { path } => {
            mirror_tree(path, target).map_err(|e| PhaseError::new(Phase::Mirroring, e))
        }
        TemplateSource::Skeleton => {
            synthesize_skeleton(target).map_err(|e| PhaseError::new(Phase::Synthesis, e))
        }
    }
}
