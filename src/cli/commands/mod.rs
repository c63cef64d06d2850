pub mod audit;
pub mod init;
pub mod plan;
pub mod run;

use colored::Colorize;

/// Display an error message with proper formatting
pub fn display_error(err: &anyhow::Error) {
    eprintln!("\n{} {}", "✗".bright_red().bold(), "Operation failed".bright_red().bold());
    eprintln!("  {} {}", "├".bright_black(), err);

    for cause in err.chain().skip(1) {
        eprintln!("  {} {}", "├".bright_black(), cause);
    }

    let hint = err.chain().find_map(|cause| {
        let cause = cause.downcast_ref::<webrefresh::RefreshError>()?;
        match cause {
            webrefresh::RefreshError::Backup(_) => {
                Some("No files were modified. Free the backup location or pass --no-backup")
            }
            webrefresh::RefreshError::Config(_) => Some("Check webrefresh.toml or regenerate it with `webrefresh init`"),
            webrefresh::RefreshError::InvalidInput(_) => Some("Check that the path is correct"),
            _ => None,
        }
    });

    match hint {
        Some(hint) => eprintln!("  {} {}", "└".bright_cyan(), hint),
        None if err.to_string().contains("Permission denied") => {
            eprintln!("  {} Check file permissions", "└".bright_cyan())
        }
        None => eprintln!(
            "  {} Run with {} for more details",
            "└".bright_black(),
            "--verbose".bright_cyan()
        ),
    }
}
