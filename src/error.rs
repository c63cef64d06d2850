use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for webrefresh operations
#[derive(Error, Debug)]
pub enum RefreshError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Backup error: {0}")]
    Backup(#[from] BackupError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Report error: {0}")]
    Report(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Backup failures abort the session before any file is touched
#[derive(Error, Debug)]
pub enum BackupError {
    #[error("Backup destination already exists: {path:?}")]
    DestinationExists { path: PathBuf },

    #[error("Failed to copy {from:?} to {to:?}: {source}")]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to walk {path:?}: {message}")]
    Walk { path: PathBuf, message: String },

    #[error("Cannot derive a backup name for {path:?}")]
    InvalidRoot { path: PathBuf },
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration at {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse configuration at {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type alias for webrefresh operations
pub type RefreshResult<T> = Result<T, RefreshError>;

/// Helper trait for adding context to IO errors
pub trait ErrorContext<T> {
    fn context<C>(self, context: C) -> RefreshResult<T>
    where
        C: fmt::Display + Send + Sync + 'static;

    fn with_context<C, F>(self, f: F) -> RefreshResult<T>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> ErrorContext<T> for Result<T, io::Error> {
    fn context<C>(self, context: C) -> RefreshResult<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| {
            RefreshError::Io(io::Error::new(e.kind(), format!("{}: {}", context, e)))
        })
    }

    fn with_context<C, F>(self, f: F) -> RefreshResult<T>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| {
            RefreshError::Io(io::Error::new(e.kind(), format!("{}: {}", f(), e)))
        })
    }
}
