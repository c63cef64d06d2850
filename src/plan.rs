use chrono::NaiveDate;
use std::fmt::{self, Write};

use crate::audit::{AuditReport, Issue};
use crate::rules::Severity;

const PHASES: [(Severity, &str, &str); 3] = [
    (
        Severity::Critical,
        "Phase 1: Critical Fixes",
        "Fix accessibility and critical issues first.",
    ),
    (
        Severity::Warning,
        "Phase 2: Modernization",
        "Update to modern patterns and practices.",
    ),
    (
        Severity::Info,
        "Phase 3: Optimization",
        "Improve performance and maintainability.",
    ),
];

/// Renders a Markdown modernization plan from an audit report
pub fn render(report: &AuditReport, generated: NaiveDate) -> String {
    let mut plan = String::new();
    // Writing into a String cannot fail
    let _ = write_plan(&mut plan, report, generated);
    plan
}

fn write_plan(out: &mut String, report: &AuditReport, generated: NaiveDate) -> fmt::Result {
    writeln!(out, "# Modernization Plan")?;
    writeln!(out, "Generated: {}", generated.format("%Y-%m-%d"))?;
    writeln!(out)?;
    writeln!(out, "## Summary")?;
    writeln!(out, "- Files: {}", report.summary.files_analyzed)?;
    writeln!(out, "- Issues: {}", report.summary.issues_found)?;

    for (severity, title, blurb) in PHASES {
        let issues: Vec<&Issue> = report.issues_with(severity).collect();

        writeln!(out)?;
        writeln!(out, "## {}", title)?;
        writeln!(out, "{}", blurb)?;
        writeln!(out)?;

        if issues.is_empty() {
            writeln!(out, "No {} issues found.", severity)?;
            continue;
        }

        for issue in issues {
            writeln!(
                out,
                "- [ ] `{}:{}` {} ({})",
                issue.file.display(),
                issue.line,
                issue.message,
                issue.kind
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "## Automated Fixes")?;
    writeln!(
        out,
        "Run `webrefresh run <path> --dry-run` to preview the rewrites, then without `--dry-run` to apply them."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditSummary, SeverityBreakdown};
    use crate::rules::Category;
    use chrono::Local;
    use std::path::PathBuf;

    fn report() -> AuditReport {
        AuditReport {
            timestamp: Local::now(),
            summary: AuditSummary {
                files_analyzed: 4,
                total_lines: 120,
                issues_found: 2,
                severity_breakdown: SeverityBreakdown {
                    critical: 1,
                    warning: 0,
                    info: 1,
                },
            },
            issues: vec![
                Issue {
                    file: PathBuf::from("index.html"),
                    line: 12,
                    severity: Severity::Critical,
                    kind: Category::Accessibility,
                    message: "Images without alt text".to_string(),
                },
                Issue {
                    file: PathBuf::from("app.js"),
                    line: 1,
                    severity: Severity::Info,
                    kind: Category::ModernJs,
                    message: "Legacy var declarations found".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_render_plan() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let plan = render(&report(), date);

        assert!(plan.starts_with("# Modernization Plan\nGenerated: 2024-05-01\n"));
        assert!(plan.contains("- Files: 4\n- Issues: 2"));
        assert!(plan.contains("- [ ] `index.html:12` Images without alt text (accessibility)"));
        assert!(plan.contains("No warning issues found."));
        assert!(plan.contains("`app.js:1` Legacy var declarations found (modern-js)"));

        let critical = plan.find("Phase 1").unwrap();
        let optimization = plan.find("Phase 3").unwrap();
        assert!(critical < plan.find("index.html").unwrap());
        assert!(optimization < plan.find("app.js").unwrap());
    }
}
