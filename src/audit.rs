//! Detection-only pass over a project.
//!
//! Runs each rule's detection predicate without rewriting anything and
//! reports one issue per rule that fires, at the line of its first match.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::config::ScanConfig;
use crate::error::{ErrorContext, RefreshError, RefreshResult};
use crate::rules::{Category, FileType, RuleCatalog, Severity};
use crate::workspace;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub file: PathBuf,
    pub line: usize,
    pub severity: Severity,
    #[serde(rename = "type")]
    pub kind: Category,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityBreakdown {
    pub critical: usize,
    pub warning: usize,
    pub info: usize,
}

impl SeverityBreakdown {
    fn add(&mut self, severity: Severity) {
        match severity {
            Severity::Critical => self.critical += 1,
            Severity::Warning => self.warning += 1,
            Severity::Info => self.info += 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSummary {
    pub files_analyzed: usize,
    pub total_lines: usize,
    pub issues_found: usize,
    pub severity_breakdown: SeverityBreakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub timestamp: DateTime<Local>,
    pub summary: AuditSummary,
    pub issues: Vec<Issue>,
}

impl AuditReport {
    pub fn issues_with(&self, severity: Severity) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |i| i.severity == severity)
    }

    pub fn write_json(&self, path: &Path) -> RefreshResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("Failed to write audit {}", path.display()))
    }

    pub fn from_json_file(path: &Path) -> RefreshResult<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read audit {}", path.display()))?;
        Ok(serde_json::from_str(&content)?)
    }
}

pub struct Auditor {
    catalog: RuleCatalog,
}

impl Auditor {
    pub fn new(catalog: RuleCatalog) -> Self {
        Self { catalog }
    }

    pub fn audit(&self, root: &Path, scan: &ScanConfig) -> RefreshResult<AuditReport> {
        if !root.exists() {
            return Err(RefreshError::InvalidInput(format!(
                "Path does not exist: {}",
                root.display()
            )));
        }

        let mut summary = AuditSummary::default();
        let mut issues = Vec::new();

        for source in workspace::discover(root, scan)? {
            let content = match workspace::read_lossy(&source.path) {
                Ok(content) => content,
                Err(err) => {
                    warn!(file = %source.path.display(), error = %err, "Skipping unreadable file");
                    continue;
                }
            };

            summary.files_analyzed += 1;
            summary.total_lines += content.split('\n').count();

            for issue in self.audit_content(&source.path, source.file_type, &content) {
                summary.severity_breakdown.add(issue.severity);
                issues.push(issue);
            }
        }

        summary.issues_found = issues.len();

        Ok(AuditReport {
            timestamp: Local::now(),
            summary,
            issues,
        })
    }

    pub fn audit_content(&self, file: &Path, file_type: FileType, content: &str) -> Vec<Issue> {
        self.catalog
            .rules(file_type)
            .iter()
            .filter_map(|rule| {
                rule.detect(content).map(|offset| Issue {
                    file: file.to_path_buf(),
                    line: line_of(content, offset),
                    severity: rule.severity(),
                    kind: rule.category(),
                    message: rule.finding().to_string(),
                })
            })
            .collect()
    }
}

impl Default for Auditor {
    fn default() -> Self {
        Self::new(RuleCatalog::new())
    }
}

/// 1-based line number of a byte offset
fn line_of(content: &str, offset: usize) -> usize {
    content[..offset.min(content.len())].matches('\n').count() + 1
}
