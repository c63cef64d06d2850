use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use webrefresh::Modernizer;

pub fn handle(path: &Path) -> Result<()> {
    let (config_path, created) = Modernizer::init(path)
        .context("Failed to initialize webrefresh in the specified directory")?;

    if created {
        println!("{} Created {}", "✓".bright_green(), config_path.display());
    } else {
        println!("{} {} already exists", "ℹ".bright_blue(), config_path.display());
    }

    println!("\n{}", "Quick start:".bright_blue().bold());
    println!("  1. Preview the rewrites: {}", "webrefresh run . --dry-run".bright_yellow());
    println!("  2. Apply them (a backup is made first): {}", "webrefresh run .".bright_yellow());
    println!(
        "  3. Set {} to {} to inline generated CSS",
        "html.generated_css".bright_cyan(),
        "\"style-block\"".bright_cyan()
    );

    Ok(())
}
