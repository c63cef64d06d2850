use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use super::{Category, Rewrite, Rule, Severity};
use crate::changelog::ChangeRecord;

static VAR_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bvar\s+([A-Za-z_$][\w$]*)\s*=").expect("Failed to compile var pattern")
});

const COMPOUND_ASSIGNMENTS: [&str; 15] = [
    ">>>=", "**=", "<<=", ">>=", "&&=", "||=", "??=", "+=", "-=", "*=", "/=", "%=", "&=", "|=",
    "^=",
];

/// Binding keyword chosen for a modernized declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Const,
    Let,
}

impl Binding {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Const => "const",
            Self::Let => "let",
        }
    }
}

/// Decides whether a `var` binding can become `const` or must stay mutable
pub trait BindingClassifier: Send + Sync {
    fn classify(&self, content: &str, identifier: &str) -> Binding;
}

/// Counts textual assignments to the name across the whole file.
///
/// Scope-unaware: an unrelated variable with the same name in another
/// function counts too, which can only push a declaration towards `let`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssignmentCountClassifier;

impl AssignmentCountClassifier {
    /// Counts `name =`, compound assignments and `++`/`--` on `name`.
    /// Comparisons (`==`, `===`) and arrow parameters (`=>`) are not assignments.
    pub fn count_assignments(content: &str, identifier: &str) -> usize {
        if identifier.is_empty() {
            return 0;
        }

        content
            .match_indices(identifier)
            .filter(|(start, _)| {
                let before = &content[..*start];
                let after = &content[*start + identifier.len()..];

                if before.chars().next_back().is_some_and(is_identifier_char)
                    || after.chars().next().is_some_and(is_identifier_char)
                {
                    return false;
                }

                let before = before.trim_end();
                if before.ends_with("++") || before.ends_with("--") {
                    return true;
                }

                let after = after.trim_start();
                after.starts_with("++")
                    || after.starts_with("--")
                    || (after.starts_with('=')
                        && !after.starts_with("==")
                        && !after.starts_with("=>"))
                    || COMPOUND_ASSIGNMENTS.iter().any(|op| after.starts_with(op))
            })
            .count()
    }
}

impl BindingClassifier for AssignmentCountClassifier {
    fn classify(&self, content: &str, identifier: &str) -> Binding {
        if Self::count_assignments(content, identifier) <= 1 {
            Binding::Const
        } else {
            Binding::Let
        }
    }
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

/// Rewrites `var` declarations to `const` or `let`
pub struct DeclarationRule {
    classifier: Box<dyn BindingClassifier>,
}

impl DeclarationRule {
    pub fn new() -> Self {
        Self::with_classifier(Box::new(AssignmentCountClassifier))
    }

    pub fn with_classifier(classifier: Box<dyn BindingClassifier>) -> Self {
        Self { classifier }
    }
}

impl Default for DeclarationRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for DeclarationRule {
    fn name(&self) -> &'static str {
        "declaration-keyword-modernization"
    }

    fn category(&self) -> Category {
        Category::ModernJs
    }

    fn severity(&self) -> Severity {
        Severity::Info
    }

    fn finding(&self) -> &'static str {
        "Legacy var declarations found"
    }

    fn detect(&self, content: &str) -> Option<usize> {
        VAR_DECLARATION.find(content).map(|m| m.start())
    }

    fn rewrite(&self, content: &str, file: &Path) -> Rewrite {
        let identifiers: Vec<String> = VAR_DECLARATION
            .captures_iter(content)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect();

        if identifiers.is_empty() {
            return Rewrite::unchanged(content);
        }

        let mut output = content.to_string();
        let (mut consts, mut lets) = (0usize, 0usize);

        for identifier in &identifiers {
            // Count first, then rewrite the first declaration still using `var`
            let binding = self.classifier.classify(&output, identifier);

            let target = VAR_DECLARATION
                .captures_iter(&output)
                .find(|caps| caps.get(1).is_some_and(|m| m.as_str() == identifier))
                .and_then(|caps| caps.get(0))
                .map(|m| m.range());

            if let Some(range) = target {
                output.replace_range(range, &format!("{} {} =", binding.keyword(), identifier));
                match binding {
                    Binding::Const => consts += 1,
                    Binding::Let => lets += 1,
                }
            }
        }

        let processed = consts + lets;
        let change = ChangeRecord::new(
            file,
            Category::ModernJs,
            format!(
                "Replaced {} var declarations with let/const ({} const, {} let)",
                processed, consts, lets
            ),
        )
        .with_count(processed);

        Rewrite {
            content: output,
            changes: vec![change],
            generated_css: Vec::new(),
        }
    }
}
