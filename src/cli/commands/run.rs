use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use webrefresh::session::{FileOutcome, FileStatus};
use webrefresh::{Modernizer, SessionOptions, SessionSummary};

pub fn handle(path: &Path, dry_run: bool, no_backup: bool, report: Option<&Path>) -> Result<()> {
    let modernizer = Modernizer::new(path).context("Failed to load webrefresh configuration")?;
    let backup = !no_backup && modernizer.config().data.session.backup;

    println!("{} {}", "Modernizing:".bright_blue().bold(), path.display());
    if dry_run {
        println!("{}", "Dry run: no files will be written".bright_yellow());
    }
    println!();

    let options = SessionOptions::new(path).dry_run(dry_run).backup(backup);
    let summary = modernizer
        .session(options)
        .run_with(print_outcome)
        .context("Modernization aborted")?;

    print_summary(&summary);

    if let Some(report) = report {
        summary
            .write_json(report)
            .context("Failed to save the change report")?;
        println!("{} Report saved to {}", "✓".bright_green(), report.display());
    }

    Ok(())
}

fn print_outcome(outcome: &FileOutcome) {
    let name = outcome.path.display();
    match &outcome.status {
        FileStatus::Modified => println!("  {} Modified: {}", "✓".bright_green(), name),
        FileStatus::WouldModify => {
            println!("  {} Would modify: {}", "[DRY RUN]".bright_yellow(), name)
        }
        FileStatus::Skipped { reason } => println!(
            "  {} Skipped: {} ({})",
            "⚠".bright_yellow(),
            name,
            reason.bright_black()
        ),
        FileStatus::Unchanged => {}
    }
}

fn print_summary(summary: &SessionSummary) {
    let rule = "=".repeat(60);
    println!("\n{}", rule.bright_blue());
    println!("{}", "MODERNIZATION SUMMARY".bright_blue().bold());
    println!("{}", rule.bright_blue());

    if let Some(backup) = &summary.backup {
        println!("\n{} Backup created: {}", "✓".bright_green(), backup.display());
    }

    let skipped: Vec<_> = summary.skipped_files().collect();

    if summary.total_changes == 0 && skipped.is_empty() {
        println!("\n{} No changes needed, code is already modern!", "✨".bright_green());
        println!("{}\n", rule.bright_blue());
        return;
    }

    println!("\nTotal changes: {}", summary.total_changes.to_string().bold());
    if !summary.by_category.is_empty() {
        println!("\nBy category:");
        for group in &summary.by_category {
            println!("  {}: {} changes", group.category.to_string().bright_cyan(), group.changes);
        }
    }

    if !summary.generated_css.is_empty() {
        println!("\n{}", "Generated CSS from inline styles:".bright_blue());
        for styles in &summary.generated_css {
            println!("  {}", styles.file.display().to_string().bright_black());
            for css in &styles.rules {
                println!("    {}", css);
            }
        }
    }

    if !skipped.is_empty() {
        println!("\n{} {} files skipped:", "⚠".bright_yellow(), skipped.len());
        for (path, reason) in &skipped {
            println!("  {} {} ({})", "•".bright_yellow(), path.display(), reason);
        }
    }

    if summary.dry_run {
        println!("\n{}", "⚠  DRY RUN - No files were modified".bright_yellow().bold());
        println!("   Remove {} to apply changes", "--dry-run".bright_cyan());
    } else {
        println!("\n{}", "✓ Changes applied successfully!".bright_green().bold());
    }

    println!("\n{}", "Next steps:".bright_blue().bold());
    println!("  1. Test your application thoroughly");
    println!("  2. Review extracted CSS classes");
    println!("  3. Customize CSS variables with your design system");
    println!("  4. Run {} again to check remaining issues", "webrefresh audit".bright_cyan());
    println!("{}\n", rule.bright_blue());
}
