//! Tags command for listing stored tags.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use crate::Config;

#[derive(Debug, Args)]
pub struct TagsArgs {
    /// Show the tags of a single item.
    #[arg(long)]
    pub item: Option<String>,
}

pub fn run<W: Write>(writer: &mut W, args: &TagsArgs, config: &Config) -> Result<()> {
    let db = super::open_database(&config.database_path)?;

    if let Some(item_id) = &args.item {
        let tags = db.list_item_tags(item_id)?;
        if tags.is_empty() {
            writeln!(writer, "No tags for item {item_id}.")?;
            return Ok(());
        }
        writeln!(writer, "Tags for item {item_id}:")?;
        for tag in tags {
            writeln!(writer, "- {tag}")?;
        }
        return Ok(());
    }

    let counts = db.list_tag_counts()?;
    if counts.is_empty() {
        writeln!(writer, "No tags recorded.")?;
        return Ok(());
    }
    writeln!(writer, "Tags:")?;
    for count in counts {
        writeln!(writer, "- {}: {}", count.tag, count.items)?;
    }
    Ok(())
}
