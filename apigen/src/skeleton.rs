//! Archive-free skeleton synthesis

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::GenerateError;
use crate::templates::{CONFIG_GO, ENTRY_POINT_GO, GITIGNORE};

/// Subdirectories every skeleton project starts with.
const SKELETON_DIRS: &[&str] = &[
    "cmd",
    "internal/api/handlers",
    "internal/api/middlewares",
    "internal/config",
    "internal/db",
    "internal/models",
    "pkg/utils",
    "tests",
];

/// Boilerplate files written after the directories exist.
const SKELETON_FILES: &[(&str, &str)] = &[
    ("cmd/main.go", ENTRY_POINT_GO),
    ("internal/config/config.go", CONFIG_GO),
    (".gitignore", GITIGNORE),
];

/// Create the fixed directory layout and boilerplate files under
/// `target_dir`.
///
/// # Errors
///
/// Returns [`GenerateError::Io`] on the first directory or file creation
/// failure; later steps are not attempted.
pub fn synthesize_skeleton(target_dir: &Path) -> Result<(), GenerateError> {
    for dir in SKELETON_DIRS {
        fs::create_dir_all(target_dir.join(dir))?;
    }

    for (relative, content) in SKELETON_FILES {
        fs::write(target_dir.join(relative), content)?;
    }

    debug!(target = %target_dir.display(), "skeleton synthesized");
    Ok(())
}
