pub mod audit;
pub mod changelog;
pub mod config;
pub mod error;
pub mod plan;
pub mod rules;
pub mod session;
pub mod transform;
pub mod workspace;

use std::path::{Path, PathBuf};

pub use changelog::{ChangeLog, ChangeRecord};
pub use error::{RefreshError, RefreshResult};
pub use rules::{Category, FileType, RuleCatalog};
pub use session::{ModernizationSession, SessionOptions, SessionSummary};
pub use transform::{FileTransformer, Transformation};

/// Entry point bundling a project's configuration with the rule engine
pub struct Modernizer {
    config: config::Config,
    transformer: FileTransformer,
}

impl Modernizer {
    /// Loads `webrefresh.toml` from `root` when present
    pub fn new(root: impl AsRef<Path>) -> RefreshResult<Self> {
        let config = config::Config::load_or_default(root)?;
        Ok(Self::with_config(config))
    }

    pub fn with_config(config: config::Config) -> Self {
        let transformer = FileTransformer::from_config(&config.data);

        Self {
            config,
            transformer,
        }
    }

    pub fn init(root: impl AsRef<Path>) -> RefreshResult<(PathBuf, bool)> {
        config::Config::init(root)
    }

    pub fn config(&self) -> &config::Config {
        &self.config
    }

    /// Transforms in-memory content, typed by `file`'s extension.
    /// Returns `None` for unsupported file types.
    pub fn transform(&self, content: &str, file: &Path) -> Option<Transformation> {
        let file_type = FileType::from_path(file)?;
        Some(self.transformer.transform(file_type, content, file))
    }

    pub fn session(&self, options: SessionOptions) -> ModernizationSession {
        ModernizationSession::new(options, self.config.clone())
    }

    pub fn audit(&self, root: impl AsRef<Path>) -> RefreshResult<audit::AuditReport> {
        audit::Auditor::new(RuleCatalog::from_config(&self.config.data))
            .audit(root.as_ref(), &self.config.data.scan)
    }
}
