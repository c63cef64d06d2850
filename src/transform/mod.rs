pub mod style_block;

use std::path::Path;
use tracing::debug;

use crate::changelog::ChangeRecord;
use crate::config::{ConfigData, GeneratedCss};
use crate::rules::{FileType, RuleCatalog};

/// Result of running a file type's rules over one file
#[derive(Debug, Clone, Default)]
pub struct Transformation {
    pub content: String,
    pub changes: Vec<ChangeRecord>,
    pub generated_css: Vec<String>,
}

impl Transformation {
    pub fn is_modified(&self, original: &str) -> bool {
        self.content != original
    }
}

/// Applies a [`RuleCatalog`] to file contents. Never touches the filesystem.
pub struct FileTransformer {
    catalog: RuleCatalog,
    generated_css: GeneratedCss,
}

impl FileTransformer {
    pub fn new(catalog: RuleCatalog, generated_css: GeneratedCss) -> Self {
        Self {
            catalog,
            generated_css,
        }
    }

    pub fn from_config(data: &ConfigData) -> Self {
        Self::new(RuleCatalog::from_config(data), data.html.generated_css)
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    pub fn transform(&self, file_type: FileType, content: &str, file: &Path) -> Transformation {
        let mut current = content.to_string();
        let mut changes = Vec::new();
        let mut generated_css = Vec::new();

        for rule in self.catalog.rules(file_type) {
            if rule.detect(&current).is_none() {
                continue;
            }

            let rewrite = rule.rewrite(&current, file);
            debug!(
                rule = rule.name(),
                file = %file.display(),
                changes = rewrite.changes.len(),
                "Applied rule"
            );

            current = rewrite.content;
            changes.extend(rewrite.changes);
            generated_css.extend(rewrite.generated_css);
        }

        if self.generated_css == GeneratedCss::StyleBlock && !generated_css.is_empty() {
            current = style_block::insert(&current, &generated_css);
        }

        Transformation {
            content: current,
            changes,
            generated_css,
        }
    }
}

impl Default for FileTransformer {
    fn default() -> Self {
        Self::from_config(&ConfigData::default())
    }
}
