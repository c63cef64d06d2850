use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use webrefresh::rules::Severity;
use webrefresh::Modernizer;

pub fn handle(path: &Path, output: Option<&Path>) -> Result<()> {
    let modernizer = Modernizer::new(path).context("Failed to load webrefresh configuration")?;

    println!("{} {}", "Auditing:".bright_blue().bold(), path.display());
    let report = modernizer.audit(path)?;

    for issue in &report.issues {
        let marker = match issue.severity {
            Severity::Critical => "✗".bright_red(),
            Severity::Warning => "⚠".bright_yellow(),
            Severity::Info => "ℹ".bright_blue(),
        };
        println!(
            "  {} {}:{} {} {}",
            marker,
            issue.file.display(),
            issue.line,
            issue.message,
            format!("[{}]", issue.kind).bright_black()
        );
    }

    let breakdown = &report.summary.severity_breakdown;
    println!(
        "\n{} Files: {}, Issues: {} ({} critical, {} warning, {} info)",
        "📊".bright_blue(),
        report.summary.files_analyzed,
        report.summary.issues_found,
        breakdown.critical.to_string().bright_red(),
        breakdown.warning.to_string().bright_yellow(),
        breakdown.info
    );

    if let Some(output) = output {
        report
            .write_json(output)
            .context("Failed to save the audit report")?;
        println!("{} Saved to: {}", "✓".bright_green(), output.display());
    }

    Ok(())
}
