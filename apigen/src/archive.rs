//! Safe zip extraction with root-prefix stripping
//!
//! Template archives bundle their content under a single top-level folder.
//! That folder name is stripped from every entry so the content lands
//! directly under the target directory. Entry paths are sanitized before any
//! write: an entry that is absolute, empty, or contains a `..` component
//! aborts the whole extraction.

use std::fs;
use std::io::{self, Read, Seek};
use std::path::{Component, Path, PathBuf};

use tracing::debug;
use zip::ZipArchive;

use crate::error::GenerateError;

/// Ceiling on bytes extracted per entry.
pub const MAX_ENTRY_BYTES: u64 = 8 * 1024 * 1024;

/// Incidental folders some archive producers include; removed from the
/// target root after extraction if present.
const JUNK_DIRS: &[&str] = &["__MACOSX"];

/// Unpack a zip archive into `target_dir`, stripping the common root folder.
///
/// Entries outside the root folder are skipped. Entries are processed in
/// index order; ancestor directories are created on demand so no ordering
/// between entries is required. The first unrecoverable entry error aborts
/// the extraction, leaving already-written entries on disk.
///
/// # Errors
///
/// Returns [`GenerateError::MalformedArchive`] if the bytes do not parse,
/// [`GenerateError::TemplateRootNotFound`] if no entry sits under a
/// top-level folder, [`GenerateError::PathTraversal`] for an escaping entry
/// path, [`GenerateError::EntryTooLarge`] for an entry beyond
/// [`MAX_ENTRY_BYTES`] and [`GenerateError::Io`] on filesystem failures.
pub fn extract_archive<R: Read + Seek>(
    reader: R,
    target_dir: &Path,
) -> Result<(), GenerateError> {
    let mut archive =
        ZipArchive::new(reader).map_err(|e| GenerateError::MalformedArchive(e.to_string()))?;

    let root = detect_root(&mut archive)?;
    let root_prefix = format!("{root}/");
    debug!(root = %root, entries = archive.len(), "extracting template archive");

    for index in 0..archive.len() {
        let entry = archive
            .by_index(index)
            .map_err(|e| GenerateError::MalformedArchive(e.to_string()))?;

        let Some(relative) = entry.name().strip_prefix(&root_prefix).map(str::to_string) else {
            continue;
        };

        if entry.is_dir() {
            // The root folder entry itself strips down to nothing.
            if relative.is_empty() {
                continue;
            }
            let dest = target_dir.join(sanitize_relative(&relative)?);
            fs::create_dir_all(&dest)?;
        } else {
            let declared_size = entry.size();
            write_entry(entry, declared_size, &relative, target_dir)?;
        }
    }

    remove_junk_dirs(target_dir)?;
    Ok(())
}

/// Find the top-level folder the template content lives under.
///
/// Scans entry names in index order and picks the first folder segment that
/// is not a known junk directory.
fn detect_root<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<String, GenerateError> {
    for index in 0..archive.len() {
        let entry = archive
            .by_index_raw(index)
            .map_err(|e| GenerateError::MalformedArchive(e.to_string()))?;
        if let Some((root, _)) = entry.name().split_once('/') {
            if !root.is_empty() && !JUNK_DIRS.contains(&root) {
                return Ok(root.to_string());
            }
        }
    }
    Err(GenerateError::TemplateRootNotFound)
}

/// Canonicalize a prefix-stripped entry path, rejecting anything that would
/// resolve outside the target directory.
fn sanitize_relative(relative: &str) -> Result<PathBuf, GenerateError> {
    let mut clean = PathBuf::new();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(GenerateError::PathTraversal(relative.to_string()));
            }
        }
    }
    Ok(clean)
}

/// Stream one file entry to disk, enforcing the per-entry byte cap.
fn write_entry(
    content: impl Read,
    declared_size: u64,
    relative: &str,
    target_dir: &Path,
) -> Result<(), GenerateError> {
    let clean = sanitize_relative(relative)?;
    if clean.as_os_str().is_empty() {
        return Err(GenerateError::PathTraversal(relative.to_string()));
    }

    if declared_size > MAX_ENTRY_BYTES {
        return Err(GenerateError::EntryTooLarge(relative.to_string()));
    }

    let dest = target_dir.join(clean);
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut out = fs::File::create(&dest)?;
    // Declared sizes can lie; guard the actual stream as well.
    let copied = io::copy(&mut content.take(MAX_ENTRY_BYTES + 1), &mut out)?;
    if copied > MAX_ENTRY_BYTES {
        drop(out);
        let _ = fs::remove_file(&dest);
        return Err(GenerateError::EntryTooLarge(relative.to_string()));
    }

    Ok(())
}

/// Drop junk artifact directories from the target root; absence is fine.
fn remove_junk_dirs(target_dir: &Path) -> Result<(), GenerateError> {
    for junk in JUNK_DIRS {
        let path = target_dir.join(junk);
        if path.is_dir() {
            debug!(path = %path.display(), "removing junk artifact directory");
            fs::remove_dir_all(&path)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    /// Build an in-memory zip from (name, content) pairs; a `None` content
    /// marks a directory entry.
    fn build_zip(entries: &[(&str, Option<&[u8]>)]) -> Cursor<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        for (name, content) in entries {
            match content {
                Some(bytes) => {
                    writer.start_file(*name, options).unwrap();
                    writer.write_all(bytes).unwrap();
                }
                None => {
                    writer.add_directory(*name, options).unwrap();
                }
            }
        }
        writer.finish().unwrap()
    }

    #[test]
    fn test_extract_strips_root_prefix() {
        let zip = build_zip(&[
            ("template/", None),
            ("template/cmd/main.go", Some(b"package main")),
            ("template/internal/config/", None),
        ]);
        let target = tempdir().unwrap();

        extract_archive(zip, target.path()).unwrap();

        assert_eq!(
            fs::read(target.path().join("cmd/main.go")).unwrap(),
            b"package main"
        );
        assert!(target.path().join("internal/config").is_dir());
        assert!(!target.path().join("template").exists());
    }

    #[test]
    fn test_extract_creates_missing_ancestors() {
        // No explicit directory entries at all.
        let zip = build_zip(&[("template/a/b/c/deep.txt", Some(b"deep"))]);
        let target = tempdir().unwrap();

        extract_archive(zip, target.path()).unwrap();
        assert_eq!(fs::read(target.path().join("a/b/c/deep.txt")).unwrap(), b"deep");
    }

    #[test]
    fn test_extract_rejects_traversal() {
        let zip = build_zip(&[
            ("template/ok.txt", Some(b"fine")),
            ("template/../../etc/passwd", Some(b"evil")),
        ]);
        let target = tempdir().unwrap();

        let result = extract_archive(zip, target.path());
        assert!(matches!(result, Err(GenerateError::PathTraversal(_))));

        // Nothing landed outside the target directory.
        assert!(!target.path().parent().unwrap().join("etc/passwd").exists());
    }

    #[test]
    fn test_extract_rejects_oversized_entry() {
        let big = vec![0u8; usize::try_from(MAX_ENTRY_BYTES).unwrap() + 1];
        let zip = build_zip(&[("template/huge.bin", Some(&big))]);
        let target = tempdir().unwrap();

        let result = extract_archive(zip, target.path());
        assert!(matches!(result, Err(GenerateError::EntryTooLarge(_))));
        assert!(!target.path().join("huge.bin").exists());
    }

    #[test]
    fn test_extract_fails_without_root_folder() {
        let zip = build_zip(&[("loose.txt", Some(b"top level"))]);
        let target = tempdir().unwrap();

        let result = extract_archive(zip, target.path());
        assert!(matches!(result, Err(GenerateError::TemplateRootNotFound)));
    }

    #[test]
    fn test_extract_skips_entries_outside_root() {
        let zip = build_zip(&[
            ("template/kept.txt", Some(b"kept")),
            ("other/dropped.txt", Some(b"dropped")),
        ]);
        let target = tempdir().unwrap();

        extract_archive(zip, target.path()).unwrap();
        assert!(target.path().join("kept.txt").exists());
        assert!(!target.path().join("dropped.txt").exists());
        assert!(!target.path().join("other").exists());
    }

    #[test]
    fn test_extract_removes_junk_directory() {
        let zip = build_zip(&[
            ("template/cmd/main.go", Some(b"package main")),
            ("template/__MACOSX/._main.go", Some(b"metadata")),
        ]);
        let target = tempdir().unwrap();

        extract_archive(zip, target.path()).unwrap();
        assert!(target.path().join("cmd/main.go").exists());
        assert!(!target.path().join("__MACOSX").exists());
    }

    #[test]
    fn test_extract_ignores_junk_only_top_level() {
        // __MACOSX must never be picked as the template root.
        let zip = build_zip(&[
            ("__MACOSX/._junk", Some(b"metadata")),
            ("template/real.txt", Some(b"real")),
        ]);
        let target = tempdir().unwrap();

        extract_archive(zip, target.path()).unwrap();
        assert!(target.path().join("real.txt").exists());
        assert!(!target.path().join("__MACOSX").exists());
    }

    #[test]
    fn test_extract_rejects_malformed_bytes() {
        let target = tempdir().unwrap();
        let result = extract_archive(Cursor::new(b"not a zip".to_vec()), target.path());
        assert!(matches!(result, Err(GenerateError::MalformedArchive(_))));
    }
}
