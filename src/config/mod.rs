pub mod project;

pub use project::Config;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigData {
    pub session: SessionConfig,
    pub scan: ScanConfig,
    pub rules: RulesConfig,
    pub html: HtmlConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub backup: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Skip files and directories whose name starts with a dot
    pub skip_hidden: bool,
    /// Directory names never descended into
    pub exclude: Vec<String>,
}

/// Per-rule switches. Disabled rules are left out of the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub inline_styles: bool,
    pub viewport: bool,
    pub alt_text: bool,
    pub deprecated_tags: bool,
    pub css_variables: bool,
    pub modern_js: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlConfig {
    pub generated_css: GeneratedCss,
}

/// Where the CSS synthesized from extracted inline styles ends up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeneratedCss {
    /// Listed in the summary and the JSON report only
    #[default]
    Report,
    /// Inserted as a `<style>` block before `</head>`
    StyleBlock,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { backup: true }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            skip_hidden: true,
            exclude: vec!["node_modules".to_string()],
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            inline_styles: true,
            viewport: true,
            alt_text: true,
            deprecated_tags: true,
            css_variables: true,
            modern_js: true,
        }
    }
}
