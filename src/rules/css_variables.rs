use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use super::{Category, Rewrite, Rule, Severity};
use crate::changelog::ChangeRecord;

pub const CUSTOM_PROPERTIES_SCAFFOLD: &str = r#"
/* CSS Custom Properties - Add your design system values here */
:root {
  --color-primary: #007bff;
  --color-secondary: #6c757d;
  --color-success: #28a745;
  --color-danger: #dc3545;
  --color-warning: #ffc107;
  --color-info: #17a2b8;

  --font-family-base: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
  --font-size-base: 1rem;
  --line-height-base: 1.5;

  --spacing-unit: 0.25rem;
  --border-radius: 0.25rem;

  --breakpoint-sm: 576px;
  --breakpoint-md: 768px;
  --breakpoint-lg: 992px;
  --breakpoint-xl: 1200px;
}

"#;

static CUSTOM_PROPERTY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"--[A-Za-z_][\w-]*\s*:").expect("Failed to compile custom property pattern")
});

/// Prepends a `:root` custom-properties block to stylesheets without one
pub struct CssVariablesRule;

impl Rule for CssVariablesRule {
    fn name(&self) -> &'static str {
        "custom-properties-scaffold"
    }

    fn category(&self) -> Category {
        Category::CssVariables
    }

    fn severity(&self) -> Severity {
        Severity::Info
    }

    fn finding(&self) -> &'static str {
        "No CSS custom properties declared"
    }

    fn detect(&self, content: &str) -> Option<usize> {
        if CUSTOM_PROPERTY.is_match(content) {
            None
        } else {
            Some(0)
        }
    }

    fn rewrite(&self, content: &str, file: &Path) -> Rewrite {
        if self.detect(content).is_none() {
            return Rewrite::unchanged(content);
        }

        Rewrite {
            content: format!("{}{}", CUSTOM_PROPERTIES_SCAFFOLD, content),
            changes: vec![ChangeRecord::new(
                file,
                Category::CssVariables,
                "Added CSS custom properties template",
            )],
            generated_css: Vec::new(),
        }
    }
}
