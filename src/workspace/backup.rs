use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

use crate::error::BackupError;

/// `<parent>/<name>_backup_<YYYYmmdd_HHMMSS>` for the given root
pub fn backup_path(root: &Path, at: DateTime<Local>) -> Result<PathBuf, BackupError> {
    let invalid = || BackupError::InvalidRoot {
        path: root.to_path_buf(),
    };

    let root = root.canonicalize().map_err(|_| invalid())?;
    let name = root.file_name().ok_or_else(invalid)?.to_string_lossy().into_owned();
    let parent = root.parent().ok_or_else(invalid)?;

    Ok(parent.join(format!("{}_backup_{}", name, at.format("%Y%m%d_%H%M%S"))))
}

/// Copies `root` (a directory tree or a single file) next to itself.
pub fn create_backup(root: &Path) -> Result<PathBuf, BackupError> {
    let destination = backup_path(root, Local::now())?;
    if destination.exists() {
        return Err(BackupError::DestinationExists { path: destination });
    }

    copy_tree(root, &destination)?;
    info!(backup = %destination.display(), "Backup created");

    Ok(destination)
}

fn copy_tree(source: &Path, destination: &Path) -> Result<(), BackupError> {
    let copy_failed = |from: &Path, to: &Path, err: std::io::Error| BackupError::CopyFailed {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source: err,
    };

    if source.is_file() {
        fs::copy(source, destination).map_err(|e| copy_failed(source, destination, e))?;
        return Ok(());
    }

    for entry in WalkDir::new(source).follow_links(true) {
        let entry = entry.map_err(|e| BackupError::Walk {
            path: source.to_path_buf(),
            message: e.to_string(),
        })?;

        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| BackupError::Walk {
                path: entry.path().to_path_buf(),
                message: e.to_string(),
            })?;
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| copy_failed(entry.path(), &target, e))?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| copy_failed(entry.path(), &target, e))?;
        }
    }

    Ok(())
}
