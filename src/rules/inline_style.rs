use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use super::{Category, Rewrite, Rule, Severity};
use crate::changelog::ChangeRecord;

// The leading whitespace keeps `font-style="..."` and `data-style="..."` out
static STYLE_ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(\s)style="([^"]*)""#).expect("Failed to compile style attribute pattern")
});

static GENERATED_CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\binline-style-(\d+)\b").expect("Failed to compile generated class pattern")
});

/// Where the `inline-style-N` counter starts for a file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClassNumbering {
    /// Every rewrite numbers its classes 1..n
    #[default]
    FromOne,
    /// Continue after the highest `inline-style-N` already in the document,
    /// so rules inlined by an earlier run keep their meaning
    AfterExisting,
}

/// Moves `style="..."` attributes into numbered `inline-style-N` classes
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineStyleRule {
    numbering: ClassNumbering,
}

impl InlineStyleRule {
    pub fn new(numbering: ClassNumbering) -> Self {
        Self { numbering }
    }

    pub fn class_name(index: usize) -> String {
        format!("inline-style-{}", index)
    }

    fn first_index(&self, content: &str) -> usize {
        match self.numbering {
            ClassNumbering::FromOne => 1,
            ClassNumbering::AfterExisting => {
                GENERATED_CLASS
                    .captures_iter(content)
                    .filter_map(|caps| caps.get(1)?.as_str().parse::<usize>().ok())
                    .max()
                    .unwrap_or(0)
                    + 1
            }
        }
    }
}

impl Rule for InlineStyleRule {
    fn name(&self) -> &'static str {
        "inline-style-extraction"
    }

    fn category(&self) -> Category {
        Category::InlineStyles
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn finding(&self) -> &'static str {
        "Inline styles found"
    }

    fn detect(&self, content: &str) -> Option<usize> {
        // Offset of `style` itself, past the separator
        STYLE_ATTRIBUTE
            .captures(content)
            .and_then(|caps| caps.get(1))
            .map(|m| m.end())
    }

    fn rewrite(&self, content: &str, file: &Path) -> Rewrite {
        let styles: Vec<(&str, &str)> = STYLE_ATTRIBUTE
            .captures_iter(content)
            .filter_map(|caps| Some((caps.get(1)?.as_str(), caps.get(2)?.as_str())))
            .collect();

        if styles.is_empty() {
            return Rewrite::unchanged(content);
        }

        let mut output = content.to_string();
        let mut generated_css = Vec::with_capacity(styles.len());

        let first = self.first_index(content);

        for (offset, (separator, style)) in styles.iter().enumerate() {
            let class_name = Self::class_name(first + offset);
            generated_css.push(format!(".{} {{ {} }}", class_name, style));

            // Only the first remaining occurrence, identical styles get their own class
            output = output.replacen(
                &format!("{}style=\"{}\"", separator, style),
                &format!("{}class=\"{}\"", separator, class_name),
                1,
            );
        }

        let change = ChangeRecord::new(
            file,
            Category::InlineStyles,
            format!("Extracted {} inline styles to classes", styles.len()),
        )
        .with_count(styles.len());

        Rewrite {
            content: output,
            changes: vec![change],
            generated_css,
        }
    }
}
