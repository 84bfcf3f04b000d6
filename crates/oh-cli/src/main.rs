use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use oh_cli::commands::{classify, show_config, tags};
use oh_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support; progress is logged at info
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,oh_cli=info"))
    };
    // Diagnostics go to stderr so stdout stays parseable with --json
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Some(Commands::Classify(args)) => {
            let report = match args.input.as_deref() {
                Some(path) if path != Path::new("-") => {
                    let file = File::open(path)
                        .with_context(|| format!("failed to open {}", path.display()))?;
                    classify::run(BufReader::new(file), &mut out, args, &config)?
                }
                _ => classify::run(io::stdin().lock(), &mut out, args, &config)?,
            };
            tracing::debug!(items = report.items_processed, "classification complete");
        }
        Some(Commands::Tags(args)) => {
            tags::run(&mut out, args, &config)?;
        }
        Some(Commands::Config(args)) => {
            show_config::run(&mut out, args, &config)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
