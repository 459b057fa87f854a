//! Candidate-file enumeration.
//!
//! The traversal engine lists the plain files a run should consider, either
//! flat (direct children of the target directory only) or recursively
//! (every directory at or below the target, each visited once). Both modes
//! exclude, by filename at every level, the engine's own log artifacts: the
//! runtime log file and the persisted operation log. Excluded entries are
//! counted as skipped rather than returned as candidates.
//!
//! Enumeration is a full snapshot taken before any file is moved, so within
//! one run each file is visited at most once even though moves create and
//! populate category folders mid-run.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A candidate file produced by traversal. Ephemeral: constructed per
/// entry, discarded after the file has been processed.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Full path to the file.
    pub path: PathBuf,
    /// The file's base name.
    pub file_name: String,
    /// Lowercased extension including the leading dot, or empty when the
    /// file has none (`README`, `.env`).
    pub extension: String,
}

impl FileRecord {
    /// Builds a record from a path, deriving name and extension.
    pub fn from_path(path: PathBuf) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_default();
        Self {
            path,
            file_name,
            extension,
        }
    }
}

/// Result of one traversal pass.
#[derive(Debug, Default)]
pub struct TraversalOutcome {
    /// Candidate files, each visited exactly once.
    pub files: Vec<FileRecord>,
    /// Log-artifact entries excluded from the candidates.
    pub skipped: usize,
    /// Directories visited below the target root (recursive mode only;
    /// the root itself is not counted).
    pub directories: usize,
}

/// Lists direct-child files of `root`, excluding log artifacts.
///
/// Subdirectories are not descended.
///
/// # Errors
///
/// Fails if the directory cannot be read; the caller treats this as fatal
/// to the run.
pub fn collect_flat(root: &Path, artifacts: &[String]) -> io::Result<TraversalOutcome> {
    let mut outcome = TraversalOutcome::default();

    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if let Ok(file_type) = entry.file_type()
            && file_type.is_file()
        {
            let name = entry.file_name().to_string_lossy().to_string();
            if artifacts.iter().any(|a| *a == name) {
                outcome.skipped += 1;
            } else {
                outcome.files.push(FileRecord::from_path(entry.path()));
            }
        }
    }

    Ok(outcome)
}

/// Lists plain files in `root` and every directory below it, excluding log
/// artifacts at every level.
///
/// Symlinks are not followed, so a symlinked directory is neither descended
/// nor reported as a file. Each directory is visited exactly once and
/// counted (the root is not), regardless of whether it holds any files.
///
/// # Errors
///
/// Any walk error (a directory becoming unreadable mid-walk) aborts the
/// traversal and is fatal to the run.
pub fn collect_recursive(root: &Path, artifacts: &[String]) -> io::Result<TraversalOutcome> {
    let mut outcome = TraversalOutcome::default();

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf());
            io::Error::new(
                e.io_error()
                    .map(io::Error::kind)
                    .unwrap_or(io::ErrorKind::Other),
                format!("walk failed at {}: {}", path.display(), e),
            )
        })?;

        if entry.file_type().is_dir() {
            if entry.depth() > 0 {
                outcome.directories += 1;
            }
            continue;
        }

        if !entry.file_type().is_file() {
            // Symlinks and other non-regular entries are not candidates.
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        if artifacts.iter().any(|a| *a == name) {
            outcome.skipped += 1;
        } else {
            outcome.files.push(FileRecord::from_path(entry.into_path()));
        }
    }

    Ok(outcome)
}
