//! Classify command: tag items by office hours.
//!
//! Items are read as JSON Lines, one item per line:
//!
//! ```text
//! {"id": "mail-1", "communication": {"date_time": "2024-01-03T09:00:00Z"}}
//! {"id": "mail-2", "communication": {}}
//! {"id": "doc-1"}
//! ```

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use oh_core::{ClassificationReport, Classifier, Item, OfficeHoursConfig, TagSink};
use oh_db::Database;

use crate::{Config, SettingsOverrides};

/// How often progress is reported, in items.
const PROGRESS_INTERVAL: usize = 1000;

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// JSON Lines file of items; reads stdin when omitted or `-`.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub settings: SettingsOverrides,

    /// Largest number of items tagged in one database call.
    #[arg(long)]
    pub batch_size: Option<NonZeroUsize>,

    /// Print the report as JSON instead of log lines.
    #[arg(long)]
    pub json: bool,
}

/// Classifies the items read from `reader` and stores their tags.
///
/// Empty input is reported and leaves the database untouched. A failed
/// write to `writer` stops tagging at the next batch.
pub fn run<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    args: &ClassifyArgs,
    config: &Config,
) -> Result<ClassificationReport> {
    let settings = args.settings.apply(&config.office_hours);
    settings
        .validate()
        .context("invalid office hours settings")?;
    let office_hours =
        OfficeHoursConfig::from_settings(&settings).context("invalid office hours settings")?;

    let items = parse_items(reader)?;
    if items.is_empty() {
        tracing::warn!("no items to classify");
        let report = ClassificationReport::default();
        if args.json {
            serde_json::to_writer_pretty(&mut *writer, &report)?;
            writeln!(writer)?;
        }
        return Ok(report);
    }
    let mut db = super::open_database(&config.database_path)?;

    if !args.json {
        writeln!(writer, "{office_hours}")?;
    }

    let batch_size = args.batch_size.unwrap_or(config.batch_size);
    let json = args.json;
    let write_error: RefCell<Option<io::Error>> = RefCell::new(None);
    let mut sink = UntilWriteFails {
        db: &mut db,
        write_error: &write_error,
    };
    let result = Classifier::new(office_hours)
        .with_batch_size(batch_size)
        .on_message(|message| {
            if json {
                tracing::info!("{message}");
            } else if write_error.borrow().is_none() {
                if let Err(err) = writeln!(writer, "{message}") {
                    *write_error.borrow_mut() = Some(err);
                }
            }
        })
        .on_progress(|current, total| {
            if current % PROGRESS_INTERVAL == 0 || current == total {
                tracing::info!("{current}/{total}");
            }
        })
        .classify(&items, &mut sink);

    if let Some(err) = write_error.into_inner() {
        return Err(err).context("failed to write output");
    }
    let report = result.context("failed to apply tags")?;

    if json {
        serde_json::to_writer_pretty(&mut *writer, &report)?;
        writeln!(writer)?;
    }
    Ok(report)
}

/// Database sink that refuses further batches once output has failed.
struct UntilWriteFails<'a> {
    db: &'a mut Database,
    write_error: &'a RefCell<Option<io::Error>>,
}

impl TagSink<Item> for UntilWriteFails<'_> {
    type Error = anyhow::Error;

    fn apply_tag(&mut self, tag: &str, items: &[&Item]) -> Result<(), Self::Error> {
        if self.write_error.borrow().is_some() {
            bail!("output failed, not applying tag '{tag}'");
        }
        self.db.apply_tag(tag, items)?;
        Ok(())
    }
}

fn parse_items<R: BufRead>(reader: R) -> Result<Vec<Item>> {
    let mut items = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", idx + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let item: Item = serde_json::from_str(trimmed)
            .with_context(|| format!("invalid JSON on line {}", idx + 1))?;
        if item.id.trim().is_empty() {
            bail!("invalid item on line {}: missing id", idx + 1);
        }
        items.push(item);
    }
    Ok(items)
}
