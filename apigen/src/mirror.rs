//! Local template directory mirroring

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::GenerateError;

/// Reproduce `source_dir` under `target_dir`, byte-for-byte.
///
/// The walk is depth-first in file-name order so runs are deterministic.
/// Directories are created idempotently; files are streamed into newly
/// created destinations.
///
/// # Errors
///
/// The first I/O error aborts the mirror with
/// [`GenerateError::CopyFailed`] naming the offending path; no
/// partial-entry recovery is attempted. A missing or non-directory source
/// fails the same way before anything is written.
pub fn mirror_tree(source_dir: &Path, target_dir: &Path) -> Result<(), GenerateError> {
    if !source_dir.is_dir() {
        return Err(copy_failed(
            source_dir,
            io::Error::new(io::ErrorKind::NotFound, "template directory not found"),
        ));
    }

    for entry in WalkDir::new(source_dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().map_or_else(|| source_dir.to_path_buf(), Path::to_path_buf);
            let source = e
                .into_io_error()
                .unwrap_or_else(|| io::Error::other("directory walk failed"));
            GenerateError::CopyFailed { path, source }
        })?;

        let Ok(relative) = entry.path().strip_prefix(source_dir) else {
            continue;
        };
        let dest = target_dir.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest).map_err(|e| copy_failed(&dest, e))?;
        } else if entry.file_type().is_file() {
            copy_file(entry.path(), &dest)?;
        }
        // Symlinks are not part of a template tree; skip them.
    }

    debug!(
        source = %source_dir.display(),
        target = %target_dir.display(),
        "template directory mirrored"
    );
    Ok(())
}

/// Stream one file from `source` into a newly created `dest`.
fn copy_file(source: &Path, dest: &Path) -> Result<(), GenerateError> {
    let mut reader = fs::File::open(source).map_err(|e| copy_failed(source, e))?;
    let mut writer = fs::File::create(dest).map_err(|e| copy_failed(dest, e))?;
    io::copy(&mut reader, &mut writer).map_err(|e| copy_failed(source, e))?;
    Ok(())
}

fn copy_failed(path: &Path, source: io::Error) -> GenerateError {
    GenerateError::CopyFailed {
        path: PathBuf::from(path),
        source,
    }
}
