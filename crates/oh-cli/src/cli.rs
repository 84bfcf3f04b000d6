//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::classify::ClassifyArgs;
use crate::commands::show_config::ConfigArgs;
use crate::commands::tags::TagsArgs;

/// Tag communications by when they were sent relative to office hours.
///
/// Reads items as JSON Lines, buckets each communication date into before,
/// during or after office hours (or a non-office day) and stores the
/// resulting tags in a local `SQLite` database.
#[derive(Debug, Parser)]
#[command(name = "oh", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Classify items and tag them in the database.
    Classify(ClassifyArgs),

    /// List stored tags.
    Tags(TagsArgs),

    /// Show the office-hours configuration that would be used.
    Config(ConfigArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_classify_overrides() {
        let cli = Cli::try_parse_from([
            "oh",
            "classify",
            "--input",
            "items.jsonl",
            "--timezone",
            "Europe/London",
            "--start",
            "08:30",
            "--office-days",
            "mon,tue,wed",
            "--batch-size",
            "100",
        ])
        .unwrap();

        let Some(Commands::Classify(args)) = cli.command else {
            panic!("expected classify command");
        };
        assert_eq!(args.input, Some(PathBuf::from("items.jsonl")));
        assert_eq!(args.settings.timezone.as_deref(), Some("Europe/London"));
        assert_eq!(args.settings.start.as_deref(), Some("08:30"));
        assert_eq!(
            args.settings.office_days,
            Some(vec!["mon".to_string(), "tue".to_string(), "wed".to_string()])
        );
        assert_eq!(args.batch_size.map(std::num::NonZeroUsize::get), Some(100));
    }

    #[test]
    fn parses_record_day_of_week_forms() {
        let parse = |args: &[&str]| {
            let cli = Cli::try_parse_from(["oh", "classify"].iter().chain(args)).unwrap();
            let Some(Commands::Classify(args)) = cli.command else {
                panic!("expected classify command");
            };
            args.settings.record_day_of_week
        };

        assert_eq!(parse(&[]), None);
        assert_eq!(parse(&["--record-day-of-week"]), Some(true));
        assert_eq!(parse(&["--record-day-of-week=false"]), Some(false));
        assert_eq!(parse(&["--record-day-of-week", "--json"]), Some(true));
    }

    #[test]
    fn rejects_zero_batch_size() {
        let result = Cli::try_parse_from(["oh", "classify", "--batch-size", "0"]);
        assert!(result.is_err());
    }
}
