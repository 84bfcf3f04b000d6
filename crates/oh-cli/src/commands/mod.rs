//! CLI subcommand implementations.

pub mod classify;
pub mod show_config;
pub mod tags;

use std::path::Path;

use anyhow::{Context, Result};
use oh_db::Database;

/// Opens the tag database, ensuring the parent directory exists.
fn open_database(path: &Path) -> Result<Database> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }
    Database::open(path).with_context(|| format!("failed to open {}", path.display()))
}
