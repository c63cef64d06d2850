use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::changelog::{CategoryCount, ChangeLog, ChangeRecord};
use crate::config::Config;
use crate::error::{ErrorContext, RefreshResult};
use crate::rules::{Category, FileType};
use crate::transform::FileTransformer;
use crate::workspace::{self, AtomicFile, SourceFile};

/// Immutable inputs of one modernization run
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub root: PathBuf,
    pub dry_run: bool,
    pub backup: bool,
}

impl SessionOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            dry_run: false,
            backup: true,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    Modified,
    WouldModify,
    Unchanged,
    Skipped { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub file_type: FileType,
    pub status: FileStatus,
    pub changes: usize,
}

/// CSS synthesized from one file's inline styles
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedStyles {
    pub file: PathBuf,
    pub rules: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub root: PathBuf,
    pub dry_run: bool,
    pub backup: Option<PathBuf>,
    pub total_changes: usize,
    pub by_category: Vec<CategoryCount>,
    pub files: Vec<FileOutcome>,
    pub changes: Vec<ChangeRecord>,
    pub generated_css: Vec<GeneratedStyles>,
}

impl SessionSummary {
    fn new(
        options: &SessionOptions,
        backup: Option<PathBuf>,
        log: ChangeLog,
        files: Vec<FileOutcome>,
        generated_css: Vec<GeneratedStyles>,
    ) -> Self {
        Self {
            root: options.root.clone(),
            dry_run: options.dry_run,
            backup,
            total_changes: log.len(),
            by_category: log.by_category(),
            files,
            changes: log.into_records(),
            generated_css,
        }
    }

    pub fn changed_files(&self) -> impl Iterator<Item = &FileOutcome> {
        self.files.iter().filter(|f| {
            matches!(f.status, FileStatus::Modified | FileStatus::WouldModify)
        })
    }

    pub fn skipped_files(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.files.iter().filter_map(|f| match &f.status {
            FileStatus::Skipped { reason } => Some((f.path.as_path(), reason.as_str())),
            _ => None,
        })
    }

    pub fn category_count(&self, category: Category) -> usize {
        self.by_category
            .iter()
            .find(|c| c.category == category)
            .map_or(0, |c| c.changes)
    }

    pub fn write_json(&self, path: &Path) -> RefreshResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("Failed to write report {}", path.display()))
    }
}

/// Runs backup, discovery, transformation and write-back for one root
pub struct ModernizationSession {
    options: SessionOptions,
    config: Config,
    transformer: FileTransformer,
}

impl ModernizationSession {
    pub fn new(options: SessionOptions, config: Config) -> Self {
        let transformer = FileTransformer::from_config(&config.data);

        Self {
            options,
            config,
            transformer,
        }
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn run(&self) -> RefreshResult<SessionSummary> {
        self.run_with(|_| {})
    }

    /// Like [`run`](Self::run), reporting each file's outcome as soon as it is known.
    pub fn run_with<F>(&self, mut observer: F) -> RefreshResult<SessionSummary>
    where
        F: FnMut(&FileOutcome),
    {
        let root = &self.options.root;

        // A failed backup aborts before any file is touched
        let backup = if self.options.backup && !self.options.dry_run {
            Some(workspace::create_backup(root)?)
        } else {
            None
        };

        let sources = workspace::discover(root, &self.config.data.scan)?;
        info!(
            root = %root.display(),
            files = sources.len(),
            dry_run = self.options.dry_run,
            "Modernizing"
        );

        let mut log = ChangeLog::new();
        let mut outcomes = Vec::with_capacity(sources.len());
        let mut generated_css = Vec::new();

        for source in &sources {
            let outcome = self.process(source, &mut log, &mut generated_css);
            observer(&outcome);
            outcomes.push(outcome);
        }

        Ok(SessionSummary::new(
            &self.options,
            backup,
            log,
            outcomes,
            generated_css,
        ))
    }

    fn process(
        &self,
        source: &SourceFile,
        log: &mut ChangeLog,
        generated_css: &mut Vec<GeneratedStyles>,
    ) -> FileOutcome {
        let outcome = |status: FileStatus, changes: usize| FileOutcome {
            path: source.path.clone(),
            file_type: source.file_type,
            status,
            changes,
        };

        let original = match workspace::read_lossy(&source.path) {
            Ok(content) => content,
            Err(err) => {
                warn!(file = %source.path.display(), error = %err, "Skipping unreadable file");
                return outcome(
                    FileStatus::Skipped {
                        reason: format!("read failed: {}", err),
                    },
                    0,
                );
            }
        };

        let transformation = self
            .transformer
            .transform(source.file_type, &original, &source.path);

        if !transformation.is_modified(&original) {
            debug!(file = %source.path.display(), "No changes");
            return outcome(FileStatus::Unchanged, 0);
        }

        let status = if self.options.dry_run {
            FileStatus::WouldModify
        } else {
            let written = AtomicFile::new(&source.path)
                .and_then(|file| file.write(transformation.content.as_bytes()));

            if let Err(err) = written {
                warn!(file = %source.path.display(), error = %err, "Skipping file that could not be written");
                return outcome(
                    FileStatus::Skipped {
                        reason: format!("write failed: {}", err),
                    },
                    0,
                );
            }

            info!(file = %source.path.display(), changes = transformation.changes.len(), "Modified");
            FileStatus::Modified
        };

        let changes = transformation.changes.len();
        log.extend(transformation.changes);
        if !transformation.generated_css.is_empty() {
            generated_css.push(GeneratedStyles {
                file: source.path.clone(),
                rules: transformation.generated_css,
            });
        }

        outcome(status, changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_dry_run_writes_nothing() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let page = temp_dir.path().join("index.html");
        fs::write(&page, "<head></head><b>x</b>")?;

        let options = SessionOptions::new(temp_dir.path()).dry_run(true);
        let summary = ModernizationSession::new(options, Config::default()).run()?;

        assert_eq!(fs::read_to_string(&page)?, "<head></head><b>x</b>");
        assert!(summary.dry_run);
        assert!(summary.backup.is_none());
        assert_eq!(summary.total_changes, 3);
        assert_eq!(summary.files[0].status, FileStatus::WouldModify);

        Ok(())
    }

    #[test]
    fn test_observer_sees_every_file() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        fs::write(temp_dir.path().join("a.js"), "var a = 1;")?;
        fs::write(temp_dir.path().join("b.js"), "const b = 1;")?;

        let options = SessionOptions::new(temp_dir.path()).backup(false);
        let mut seen = Vec::new();
        let summary = ModernizationSession::new(options, Config::default())
            .run_with(|outcome| seen.push(outcome.status.clone()))?;

        assert_eq!(seen, vec![FileStatus::Modified, FileStatus::Unchanged]);
        assert_eq!(summary.category_count(Category::ModernJs), 1);
        assert_eq!(fs::read_to_string(temp_dir.path().join("a.js"))?, "const a = 1;");

        Ok(())
    }
}
