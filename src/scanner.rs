use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace, warn};

#[derive(Error, Debug)]
pub enum ScannerError {
    #[error("Path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Failed to read directory: {0}")]
    IoError(#[from] std::io::Error),
}

/// Snapshot of one file taken when the folder was listed.
///
/// Stale as soon as anything in the folder is renamed.
#[derive(Debug, Clone, Serialize)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
    pub modified: Option<DateTime<Local>>,
}

impl FileEntry {
    pub fn new(name: String, path: PathBuf, size: u64, modified: Option<DateTime<Local>>) -> Self {
        Self {
            name,
            path,
            size,
            modified,
        }
    }
}

/// List the regular files directly inside `target`.
///
/// Subdirectories and files whose names are not valid UTF-8 are skipped.
/// Nothing is re-sorted: entries come back in the order the file system
/// lists them, which is the order numbering uses.
pub fn scan_folder(target: &Path) -> Result<Vec<FileEntry>, ScannerError> {
    debug!(path = ?target, "Scanning folder");

    if !target.exists() {
        return Err(ScannerError::PathNotFound(target.to_path_buf()));
    }

    if !target.is_dir() {
        return Err(ScannerError::NotADirectory(target.to_path_buf()));
    }

    let mut entries = Vec::new();

    let read_dir = fs::read_dir(target).map_err(|e| {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            ScannerError::PermissionDenied(target.to_path_buf())
        } else {
            ScannerError::IoError(e)
        }
    })?;

    for entry in read_dir {
        let entry = entry?;
        let path = entry.path();

        trace!(entry = ?path, "Examining entry");

        let metadata = match fs::metadata(&path) {
            Ok(m) => m,
            Err(e) => {
                warn!(path = ?path, error = %e, "Skipping unreadable entry");
                continue;
            }
        };

        if !metadata.is_file() {
            trace!(path = ?path, "Skipping non-file");
            continue;
        }

        // Rules work on text; a lossy copy would rename the file by accident.
        let name = match path.file_name().map(|n| n.to_str()) {
            Some(Some(n)) => n.to_string(),
            Some(None) => {
                warn!(path = ?path, "Skipping file whose name is not valid UTF-8");
                continue;
            }
            None => continue,
        };

        let modified = metadata.modified().ok().map(DateTime::<Local>::from);

        trace!(name = %name, size = metadata.len(), "Found file");
        entries.push(FileEntry::new(name, path, metadata.len(), modified));
    }

    debug!(count = entries.len(), "Scan complete");

    Ok(entries)
}
