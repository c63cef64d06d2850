use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::changelog::ChangeRecord;

/// File types the engine knows how to modernize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Html,
    Css,
    Js,
}

impl FileType {
    /// Classifies a path by extension. `.htm` counts as HTML.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "html" | "htm" => Some(Self::Html),
            "css" => Some(Self::Css),
            "js" => Some(Self::Js),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Css => "css",
            Self::Js => "js",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Change category tag attached to every record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    InlineStyles,
    Viewport,
    Accessibility,
    DeprecatedTags,
    CssVariables,
    ModernJs,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InlineStyles => "inline-styles",
            Self::Viewport => "viewport",
            Self::Accessibility => "accessibility",
            Self::DeprecatedTags => "deprecated-tags",
            Self::CssVariables => "css-variables",
            Self::ModernJs => "modern-js",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How urgent a legacy pattern is when reported by an audit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of a single rule application
#[derive(Debug, Clone, Default)]
pub struct Rewrite {
    pub content: String,
    pub changes: Vec<ChangeRecord>,
    /// CSS rule text synthesized while rewriting, if any
    pub generated_css: Vec<String>,
}

impl Rewrite {
    pub fn unchanged(content: &str) -> Self {
        Self {
            content: content.to_string(),
            ..Self::default()
        }
    }
}
