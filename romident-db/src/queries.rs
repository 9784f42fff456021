//! Read queries: point lookups and catalog summaries.

use romident_dat::{GameRecord, GrammarProfile};
use rusqlite::{OptionalExtension, Row, params};

use crate::store::{CatalogStore, StoreError};

/// Row count for one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformCount {
    pub platform: String,
    pub records: u64,
}

impl CatalogStore {
    /// Find the first record with this content hash (case-insensitive).
    ///
    /// An empty hash never matches. Stored hashes are compared without regard
    /// to case, so catalogs written by other tools match too.
    pub fn lookup_by_hash(&self, hash: &str) -> Result<Option<GameRecord>, StoreError> {
        let conn = self.conn()?;
        let hash = hash.trim().to_ascii_lowercase();
        if hash.is_empty() {
            return Ok(None);
        }

        let sql = format!(
            "SELECT {} FROM games WHERE hash = ?1 COLLATE NOCASE ORDER BY rowid LIMIT 1",
            self.columns()
        );
        let profile = self.profile();
        let record = conn
            .query_row(&sql, params![hash], |row| row_to_record(row, profile))
            .optional()?;
        Ok(record)
    }

    /// Find the first record with this ROM filename (case-insensitive).
    pub fn lookup_by_filename(&self, filename: &str) -> Result<Option<GameRecord>, StoreError> {
        let conn = self.conn()?;
        if self.profile() == GrammarProfile::NameOnly {
            return Err(StoreError::FilenameNotIndexed);
        }
        if filename.is_empty() {
            return Ok(None);
        }

        let record = conn
            .query_row(
                "SELECT name, filename, platform, hash FROM games
                 WHERE filename = ?1 COLLATE NOCASE ORDER BY rowid LIMIT 1",
                params![filename],
                |row| row_to_record(row, GrammarProfile::Filename),
            )
            .optional()?;
        Ok(record)
    }

    /// Total number of rows.
    pub fn count(&self) -> Result<u64, StoreError> {
        let n: i64 = self
            .conn()?
            .query_row("SELECT COUNT(*) FROM games", [], |row| row.get(0))?;
        Ok(n as u64)
    }

    /// Row counts per platform, ordered by platform name.
    pub fn platforms(&self) -> Result<Vec<PlatformCount>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT platform, COUNT(*) FROM games GROUP BY platform ORDER BY platform",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(PlatformCount {
                platform: row.get(0)?,
                records: row.get::<_, i64>(1)? as u64,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    fn columns(&self) -> &'static str {
        match self.profile() {
            GrammarProfile::Filename => "name, filename, platform, hash",
            GrammarProfile::NameOnly => "name, platform, hash",
        }
    }
}

fn row_to_record(row: &Row<'_>, profile: GrammarProfile) -> rusqlite::Result<GameRecord> {
    match profile {
        GrammarProfile::Filename => Ok(GameRecord {
            name: row.get(0)?,
            filename: row.get(1)?,
            platform: row.get(2)?,
            hash: read_hash(row, 3)?,
        }),
        GrammarProfile::NameOnly => Ok(GameRecord {
            name: row.get(0)?,
            filename: String::new(),
            platform: row.get(1)?,
            hash: read_hash(row, 2)?,
        }),
    }
}

/// NULL reads as the empty hash; anything else is normalized to lowercase.
fn read_hash(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    let hash: Option<String> = row.get(idx)?;
    Ok(hash.map(|h| h.to_ascii_lowercase()).unwrap_or_default())
}
