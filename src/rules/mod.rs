pub mod alt_text;
pub mod css_variables;
pub mod declarations;
pub mod deprecated;
pub mod inline_style;
pub mod types;
pub mod viewport;

use std::path::Path;

pub use types::{Category, FileType, Rewrite, Severity};

use crate::config::{ConfigData, GeneratedCss};
use inline_style::ClassNumbering;

/// A single detection and rewrite step scoped to one file type.
///
/// Rules are pure text transforms. A rule whose pattern is absent must
/// return the content unchanged with no change records.
pub trait Rule: Send + Sync {
    fn name(&self) -> &'static str;

    fn category(&self) -> Category;

    /// Severity reported when the pattern is found during an audit
    fn severity(&self) -> Severity;

    /// Short audit message describing the legacy pattern
    fn finding(&self) -> &'static str;

    /// Byte offset of the first legacy occurrence, `None` when there is nothing to do
    fn detect(&self, content: &str) -> Option<usize>;

    fn rewrite(&self, content: &str, file: &Path) -> Rewrite;
}

/// Ordered rules per file type. Later rules see the output of earlier ones.
pub struct RuleCatalog {
    html: Vec<Box<dyn Rule>>,
    css: Vec<Box<dyn Rule>>,
    js: Vec<Box<dyn Rule>>,
}

impl RuleCatalog {
    pub fn new() -> Self {
        Self::from_config(&ConfigData::default())
    }

    /// Enabled rules from `[rules]`. Generated classes keep counting across
    /// runs when their CSS is written into the page.
    pub fn from_config(data: &ConfigData) -> Self {
        let config = &data.rules;
        let numbering = match data.html.generated_css {
            GeneratedCss::Report => ClassNumbering::FromOne,
            GeneratedCss::StyleBlock => ClassNumbering::AfterExisting,
        };

        let mut html: Vec<Box<dyn Rule>> = Vec::new();
        if config.inline_styles {
            html.push(Box::new(inline_style::InlineStyleRule::new(numbering)));
        }
        if config.viewport {
            html.push(Box::new(viewport::ViewportRule));
        }
        if config.alt_text {
            html.push(Box::new(alt_text::AltTextRule));
        }
        if config.deprecated_tags {
            html.push(Box::new(deprecated::DeprecatedTagRule));
        }

        let mut css: Vec<Box<dyn Rule>> = Vec::new();
        if config.css_variables {
            css.push(Box::new(css_variables::CssVariablesRule));
        }

        let mut js: Vec<Box<dyn Rule>> = Vec::new();
        if config.modern_js {
            js.push(Box::new(declarations::DeclarationRule::new()));
        }

        Self { html, css, js }
    }

    pub fn rules(&self, file_type: FileType) -> &[Box<dyn Rule>] {
        match file_type {
            FileType::Html => &self.html,
            FileType::Css => &self.css,
            FileType::Js => &self.js,
        }
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RulesConfig;

    fn names(catalog: &RuleCatalog, file_type: FileType) -> Vec<&'static str> {
        catalog.rules(file_type).iter().map(|r| r.name()).collect()
    }

    #[test]
    fn test_html_rule_order() {
        let catalog = RuleCatalog::new();
        assert_eq!(
            names(&catalog, FileType::Html),
            vec![
                "inline-style-extraction",
                "viewport-insertion",
                "alt-text-synthesis",
                "deprecated-tag-replacement",
            ]
        );
        assert_eq!(names(&catalog, FileType::Css), vec!["custom-properties-scaffold"]);
        assert_eq!(
            names(&catalog, FileType::Js),
            vec!["declaration-keyword-modernization"]
        );
    }

    #[test]
    fn test_disabled_rules_are_left_out() {
        let config = ConfigData {
            rules: RulesConfig {
                viewport: false,
                modern_js: false,
                ..RulesConfig::default()
            },
            ..ConfigData::default()
        };
        let catalog = RuleCatalog::from_config(&config);

        assert_eq!(
            names(&catalog, FileType::Html),
            vec![
                "inline-style-extraction",
                "alt-text-synthesis",
                "deprecated-tag-replacement",
            ]
        );
        assert!(catalog.rules(FileType::Js).is_empty());
    }
}
