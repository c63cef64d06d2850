use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use webrefresh::audit::AuditReport;

pub fn handle(audit_file: &Path, output: Option<&Path>) -> Result<()> {
    let report = AuditReport::from_json_file(audit_file)
        .with_context(|| format!("Failed to load audit: {}", audit_file.display()))?;

    let plan = webrefresh::plan::render(&report, chrono::Local::now().date_naive());

    match output {
        Some(output) => {
            std::fs::write(output, &plan)
                .with_context(|| format!("Failed to write plan: {}", output.display()))?;
            println!("{} Plan saved to: {}", "✓".bright_green(), output.display());
        }
        None => print!("{}", plan),
    }

    Ok(())
}
