//! Project name validation and target directory allocation

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::GenerateError;

/// Validate `name` and create `base_dir/<name>` as the project root.
///
/// The directory is created non-recursively: exactly one new, empty
/// directory exists on success and nothing is created on failure. A
/// pre-existing directory fails with [`GenerateError::TargetExists`] and is
/// left untouched.
///
/// # Errors
///
/// Returns [`GenerateError::InvalidName`] for an empty or unusable name,
/// [`GenerateError::TargetExists`] if the target is already occupied,
/// [`GenerateError::PermissionDenied`] or [`GenerateError::Io`] on other
/// filesystem errors.
pub fn allocate_target(base_dir: &Path, name: &str) -> Result<PathBuf, GenerateError> {
    validate_name(name)?;

    let target = base_dir.join(name);
    match fs::create_dir(&target) {
        Ok(()) => Ok(target),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            Err(GenerateError::TargetExists(target))
        }
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            Err(GenerateError::PermissionDenied(target))
        }
        Err(e) => Err(GenerateError::Io(e)),
    }
}

/// Check that `name` is usable as a single directory name.
fn validate_name(name: &str) -> Result<(), GenerateError> {
    let valid = !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(GenerateError::InvalidName(name.to_string()))
    }
}
