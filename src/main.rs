mod cli;

use anyhow::Result;
use clap::Parser;
use cli::commands;

fn main() {
    let cli = cli::Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run_command(cli) {
        commands::display_error(&err);
        std::process::exit(1);
    }
}

fn run_command(cli: cli::Cli) -> Result<()> {
    use cli::Commands;

    match cli.command {
        Commands::Run {
            path,
            dry_run,
            no_backup,
            report,
        } => commands::run::handle(&path, dry_run, no_backup, report.as_deref()),
        Commands::Audit { path, output } => commands::audit::handle(&path, output.as_deref()),
        Commands::Plan { audit_file, output } => {
            commands::plan::handle(&audit_file, output.as_deref())
        }
        Commands::Init { path } => commands::init::handle(&path),
    }
}
