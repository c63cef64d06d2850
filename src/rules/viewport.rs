use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use super::{Category, Rewrite, Rule, Severity};
use crate::changelog::ChangeRecord;

pub const VIEWPORT_TAG: &str =
    r#"<meta name="viewport" content="width=device-width, initial-scale=1.0">"#;

static VIEWPORT_META: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta\s[^>]*name\s*=\s*["']?viewport"#)
        .expect("Failed to compile viewport pattern")
});

static HEAD_OPEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<head(?:\s[^>]*)?>").expect("Failed to compile head pattern")
});

/// Inserts a responsive viewport meta tag after the first `<head>`
pub struct ViewportRule;

impl Rule for ViewportRule {
    fn name(&self) -> &'static str {
        "viewport-insertion"
    }

    fn category(&self) -> Category {
        Category::Viewport
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn finding(&self) -> &'static str {
        "Missing viewport"
    }

    fn detect(&self, content: &str) -> Option<usize> {
        if VIEWPORT_META.is_match(content) {
            return None;
        }
        HEAD_OPEN.find(content).map(|m| m.start())
    }

    fn rewrite(&self, content: &str, file: &Path) -> Rewrite {
        if VIEWPORT_META.is_match(content) {
            return Rewrite::unchanged(content);
        }

        let Some(head) = HEAD_OPEN.find(content) else {
            return Rewrite::unchanged(content);
        };

        let mut output = String::with_capacity(content.len() + VIEWPORT_TAG.len() + 5);
        output.push_str(&content[..head.end()]);
        output.push_str("\n    ");
        output.push_str(VIEWPORT_TAG);
        output.push_str(&content[head.end()..]);

        Rewrite {
            content: output,
            changes: vec![ChangeRecord::new(
                file,
                Category::Viewport,
                "Added viewport meta tag",
            )],
            generated_css: Vec::new(),
        }
    }
}
