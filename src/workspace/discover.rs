use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

use crate::config::ScanConfig;
use crate::error::{RefreshError, RefreshResult};
use crate::rules::FileType;

/// A discovered file and the type its extension maps to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub file_type: FileType,
}

/// Finds HTML, CSS and JS files under `root` in sorted walk order.
///
/// A root that is itself a supported file yields just that file.
/// Unreadable directory entries are logged and skipped.
pub fn discover(root: &Path, scan: &ScanConfig) -> RefreshResult<Vec<SourceFile>> {
    if !root.exists() {
        return Err(RefreshError::InvalidInput(format!(
            "Path does not exist: {}",
            root.display()
        )));
    }

    if root.is_file() {
        return Ok(FileType::from_path(root)
            .map(|file_type| SourceFile {
                path: root.to_path_buf(),
                file_type,
            })
            .into_iter()
            .collect());
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_ignored(entry, scan));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "Skipping unreadable entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if let Some(file_type) = FileType::from_path(entry.path()) {
            files.push(SourceFile {
                path: entry.into_path(),
                file_type,
            });
        }
    }

    Ok(files)
}

fn is_ignored(entry: &DirEntry, scan: &ScanConfig) -> bool {
    let name = entry.file_name().to_string_lossy();

    if scan.skip_hidden && name.starts_with('.') {
        return true;
    }

    entry.file_type().is_dir() && scan.exclude.iter().any(|excluded| excluded.as_str() == name)
}
