//! Storage layer for item tags.
//!
//! Persists tags applied by the classifier using `rusqlite`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! A `Database` instance can be moved between threads but cannot be shared
//! across threads without external synchronization.
//!
//! # Schema
//!
//! A single `item_tags` table keyed by `(item_id, tag)`. Tagging is an
//! `INSERT OR IGNORE`, so applying a tag twice to the same item is a no-op
//! and repeated batches for one tag add up to their union.

use std::path::Path;

use oh_core::{Item, TagSink};
use rusqlite::{Connection, params};
use thiserror::Error;

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A tag was blank.
    #[error("tag cannot be empty")]
    EmptyTag,
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

/// Number of items carrying a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCount {
    pub tag: String,
    pub items: usize,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS item_tags (
                item_id TEXT NOT NULL,
                tag TEXT NOT NULL,
                PRIMARY KEY (item_id, tag)
            );

            CREATE INDEX IF NOT EXISTS idx_item_tags_tag ON item_tags(tag);
            ",
        )?;
        Ok(())
    }

    /// Tags a batch of items in one transaction, ignoring existing pairs.
    ///
    /// Returns the number of newly tagged items.
    pub fn add_item_tags<'a, I>(&mut self, tag: &str, item_ids: I) -> Result<usize, DbError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        if tag.trim().is_empty() {
            return Err(DbError::EmptyTag);
        }
        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt =
                tx.prepare("INSERT OR IGNORE INTO item_tags (item_id, tag) VALUES (?, ?)")?;
            for item_id in item_ids {
                inserted += stmt.execute(params![item_id, tag])?;
            }
        }
        tx.commit()?;
        tracing::debug!(tag, inserted, "stored item tags");
        Ok(inserted)
    }

    /// Lists tags with their item counts, ordered by tag.
    pub fn list_tag_counts(&self) -> Result<Vec<TagCount>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT tag, COUNT(*)
            FROM item_tags
            GROUP BY tag
            ORDER BY tag ASC
            ",
        )?;
        let rows = stmt.query_map([], |row| {
            let items: i64 = row.get(1)?;
            Ok(TagCount {
                tag: row.get(0)?,
                items: usize::try_from(items).unwrap_or(0),
            })
        })?;
        let mut counts = Vec::new();
        for row in rows {
            counts.push(row?);
        }
        Ok(counts)
    }

    /// Lists the tags of one item, ordered by tag.
    pub fn list_item_tags(&self, item_id: &str) -> Result<Vec<String>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT tag FROM item_tags WHERE item_id = ? ORDER BY tag ASC")?;
        let rows = stmt.query_map([item_id], |row| row.get(0))?;
        let mut tags = Vec::new();
        for row in rows {
            tags.push(row?);
        }
        Ok(tags)
    }
}

impl TagSink<Item> for Database {
    type Error = DbError;

    fn apply_tag(&mut self, tag: &str, items: &[&Item]) -> Result<(), Self::Error> {
        self.add_item_tags(tag, items.iter().map(|item| item.id.as_str()))?;
        Ok(())
    }
}
