use once_cell::sync::Lazy;
use regex::Regex;

static HEAD_CLOSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)</head\s*>").expect("Failed to compile head close pattern")
});

/// Inserts the generated rules as a `<style>` block before `</head>`,
/// or at the very start when the document has no head.
pub fn insert(content: &str, rules: &[String]) -> String {
    let block = format!("<style>\n{}\n</style>\n", rules.join("\n"));

    match HEAD_CLOSE.find(content) {
        Some(m) => {
            let mut output = String::with_capacity(content.len() + block.len());
            output.push_str(&content[..m.start()]);
            output.push_str(&block);
            output.push_str(&content[m.start()..]);
            output
        }
        None => format!("{}{}", block, content),
    }
}
