use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use super::{Category, Rewrite, Rule, Severity};
use crate::changelog::ChangeRecord;

pub const DEFAULT_ALT_TEXT: &str = "Image";

static IMG_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<img\b[^>]*>").expect("Failed to compile img pattern")
});

static ALT_ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\salt(?:\s*=|[\s/>])").expect("Failed to compile alt pattern")
});

static SRC_ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\ssrc\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("Failed to compile src pattern")
});

/// Adds `alt` attributes derived from the image filename
pub struct AltTextRule;

impl AltTextRule {
    fn missing_alt(content: &str) -> impl Iterator<Item = regex::Match<'_>> {
        IMG_TAG
            .find_iter(content)
            .filter(|m| !ALT_ATTRIBUTE.is_match(m.as_str()))
    }

    fn src_of(tag: &str) -> Option<&str> {
        let caps = SRC_ATTRIBUTE.captures(tag)?;
        caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str())
    }
}

/// `images/my-cool_photo.png` → `My Cool Photo`; no usable src → `Image`.
pub fn derive_alt_text(src: Option<&str>) -> String {
    let stem = src
        .and_then(|s| Path::new(s).file_stem())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let text = title_case(&stem.replace(['-', '_'], " "));
    if text.trim().is_empty() {
        DEFAULT_ALT_TEXT.to_string()
    } else {
        text.replace('"', "&quot;")
    }
}

/// Upper-cases the first letter of every alphabetic run, lower-cases the rest
fn title_case(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut in_word = false;

    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                output.extend(ch.to_lowercase());
            } else {
                output.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            output.push(ch);
            in_word = false;
        }
    }

    output
}

impl Rule for AltTextRule {
    fn name(&self) -> &'static str {
        "alt-text-synthesis"
    }

    fn category(&self) -> Category {
        Category::Accessibility
    }

    fn severity(&self) -> Severity {
        Severity::Critical
    }

    fn finding(&self) -> &'static str {
        "Images without alt text"
    }

    fn detect(&self, content: &str) -> Option<usize> {
        Self::missing_alt(content).next().map(|m| m.start())
    }

    fn rewrite(&self, content: &str, file: &Path) -> Rewrite {
        let tags: Vec<&str> = Self::missing_alt(content).map(|m| m.as_str()).collect();

        if tags.is_empty() {
            return Rewrite::unchanged(content);
        }

        let mut output = content.to_string();
        for tag in &tags {
            let alt_text = derive_alt_text(Self::src_of(tag));
            // IMG_TAG guarantees an ASCII `<img` prefix
            let (open, rest) = tag.split_at(4);
            let with_alt = format!("{} alt=\"{}\"{}", open, alt_text, rest);
            output = output.replacen(tag, &with_alt, 1);
        }

        let change = ChangeRecord::new(
            file,
            Category::Accessibility,
            format!("Added alt attributes to {} images", tags.len()),
        )
        .with_count(tags.len());

        Rewrite {
            content: output,
            changes: vec![change],
            generated_css: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_derive_alt_text() {
        assert_eq!(derive_alt_text(Some("my-cool_photo.png")), "My Cool Photo");
        assert_eq!(derive_alt_text(Some("/assets/img/LOGO.svg")), "Logo");
        assert_eq!(derive_alt_text(Some("team_2024-photo.jpg")), "Team 2024 Photo");
        assert_eq!(derive_alt_text(None), "Image");
        assert_eq!(derive_alt_text(Some("")), "Image");
    }

    #[test]
    fn test_adds_alt_from_src() {
        let content = r#"<img src="my-cool_photo.png">"#;
        let rewrite = AltTextRule.rewrite(content, Path::new("index.html"));

        assert_eq!(
            rewrite.content,
            r#"<img alt="My Cool Photo" src="my-cool_photo.png">"#
        );
        assert_eq!(rewrite.changes[0].count(), Some(1));
    }

    #[test]
    fn test_img_without_src() {
        let rewrite = AltTextRule.rewrite("<img>", Path::new("index.html"));
        assert_eq!(rewrite.content, r#"<img alt="Image">"#);
    }

    #[test]
    fn test_existing_alt_untouched() {
        let content = r#"<img alt="" src="spacer.gif"><img src='hero.webp' />"#;
        let rewrite = AltTextRule.rewrite(content, Path::new("index.html"));

        assert_eq!(
            rewrite.content,
            r#"<img alt="" src="spacer.gif"><img alt="Hero" src='hero.webp' />"#
        );
        assert_eq!(rewrite.changes[0].count(), Some(1));
    }

    #[test]
    fn test_duplicate_tags_each_fixed_once() {
        let content = r#"<img src="a.png"><img src="a.png">"#;
        let rewrite = AltTextRule.rewrite(content, Path::new("index.html"));

        assert_eq!(
            rewrite.content,
            r#"<img alt="A" src="a.png"><img alt="A" src="a.png">"#
        );
        assert!(AltTextRule.detect(&rewrite.content).is_none());
    }

    #[test]
    fn test_data_alt_is_not_alt() {
        let content = r#"<img data-alt="x" src="cat.png">"#;
        assert!(AltTextRule.detect(content).is_some());
    }

    #[test]
    fn test_bare_alt_counts_as_present() {
        for content in [r#"<img alt src="x.png">"#, "<img src=\"x.png\" alt>", "<img src=\"x.png\" ALT/>"] {
            assert!(AltTextRule.detect(content).is_none(), "{}", content);
            assert_eq!(AltTextRule.rewrite(content, Path::new("a.html")).content, content);
        }
    }
}
