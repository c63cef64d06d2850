use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;
use std::path::Path;

use super::{Category, Rewrite, Rule, Severity};
use crate::changelog::ChangeRecord;

/// Legacy tag tokens and their replacements, in logging order
pub const DEPRECATED_TAGS: [(&str, &str); 6] = [
    ("<b>", "<strong>"),
    ("</b>", "</strong>"),
    ("<i>", "<em>"),
    ("</i>", "</em>"),
    ("<center>", r#"<div style="text-align: center;">"#),
    ("</center>", "</div>"),
];

static DEPRECATED_MATCHER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostFirst)
        .build(DEPRECATED_TAGS.iter().map(|(old, _)| *old))
        .expect("Failed to compile deprecated tag patterns")
});

/// Replaces `<b>`, `<i>` and `<center>` with their modern equivalents
pub struct DeprecatedTagRule;

impl Rule for DeprecatedTagRule {
    fn name(&self) -> &'static str {
        "deprecated-tag-replacement"
    }

    fn category(&self) -> Category {
        Category::DeprecatedTags
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn finding(&self) -> &'static str {
        "Deprecated presentational tags found"
    }

    fn detect(&self, content: &str) -> Option<usize> {
        DEPRECATED_MATCHER.find(content).map(|m| m.start())
    }

    fn rewrite(&self, content: &str, file: &Path) -> Rewrite {
        let mut counts = [0usize; DEPRECATED_TAGS.len()];
        for m in DEPRECATED_MATCHER.find_iter(content) {
            counts[m.pattern().as_usize()] += 1;
        }

        if counts.iter().all(|&count| count == 0) {
            return Rewrite::unchanged(content);
        }

        let replacements: Vec<&str> = DEPRECATED_TAGS.iter().map(|(_, new)| *new).collect();
        let output = DEPRECATED_MATCHER.replace_all(content, &replacements);

        // One record per mapping entry, not per occurrence
        let changes = DEPRECATED_TAGS
            .iter()
            .zip(counts)
            .filter(|(_, count)| *count > 0)
            .map(|((old, new), count)| {
                ChangeRecord::new(
                    file,
                    Category::DeprecatedTags,
                    format!("Replaced {} with {}", old, new),
                )
                .with_count(count)
            })
            .collect();

        Rewrite {
            content: output,
            changes,
            generated_css: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bold_becomes_strong() {
        let rewrite = DeprecatedTagRule.rewrite("<b>hi</b>", Path::new("a.html"));

        assert_eq!(rewrite.content, "<strong>hi</strong>");
        let descriptions: Vec<&str> = rewrite.changes.iter().map(|c| c.description()).collect();
        assert_eq!(
            descriptions,
            vec!["Replaced <b> with <strong>", "Replaced </b> with </strong>"]
        );
    }

    #[test]
    fn test_logged_once_per_pair_regardless_of_occurrences() {
        let content = "<b>1</b> <b>2</b> <b>3</b>";
        let rewrite = DeprecatedTagRule.rewrite(content, Path::new("a.html"));

        assert_eq!(rewrite.content, "<strong>1</strong> <strong>2</strong> <strong>3</strong>");
        assert_eq!(rewrite.changes.len(), 2);
        assert!(rewrite.changes.iter().all(|c| c.count() == Some(3)));
    }

    #[test]
    fn test_center_and_italic() {
        let content = "<center><i>note</i></center>";
        let rewrite = DeprecatedTagRule.rewrite(content, Path::new("a.html"));

        assert_eq!(
            rewrite.content,
            r#"<div style="text-align: center;"><em>note</em></div>"#
        );
        assert_eq!(rewrite.changes.len(), 4);
    }

    #[test]
    fn test_img_and_body_are_not_tags_to_replace() {
        let content = r#"<body><img src="x.png"><br><blockquote>q</blockquote></body>"#;
        assert!(DeprecatedTagRule.detect(content).is_none());

        let rewrite = DeprecatedTagRule.rewrite(content, Path::new("a.html"));
        assert_eq!(rewrite.content, content);
        assert!(rewrite.changes.is_empty());
    }
}
