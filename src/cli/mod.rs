pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "webrefresh")]
#[command(about = "Rewrite legacy HTML, CSS and JavaScript to modern equivalents", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Modernize every HTML, CSS and JS file under a path")]
    Run {
        #[arg(help = "Project directory or single file")]
        path: PathBuf,
        #[arg(long, help = "Preview changes without applying them")]
        dry_run: bool,
        #[arg(long, help = "Skip creating a backup (not recommended)")]
        no_backup: bool,
        #[arg(long, help = "Write a JSON report of all changes")]
        report: Option<PathBuf>,
    },

    #[command(about = "Report legacy patterns without changing anything")]
    Audit {
        #[arg(help = "Project directory or single file")]
        path: PathBuf,
        #[arg(short, long, help = "Save the audit as JSON")]
        output: Option<PathBuf>,
    },

    #[command(about = "Generate a Markdown modernization plan from an audit")]
    Plan {
        #[arg(help = "Audit JSON produced by `webrefresh audit -o`")]
        audit_file: PathBuf,
        #[arg(short, long, help = "Write the plan to a file instead of stdout")]
        output: Option<PathBuf>,
    },

    #[command(about = "Write a default webrefresh.toml")]
    Init {
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}
