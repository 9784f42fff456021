//! Write operations on the catalog.

use romident_dat::{GameRecord, GrammarProfile};
use rusqlite::{Connection, params};

use crate::store::{CatalogStore, StoreError};

impl CatalogStore {
    /// Insert `records` in a single transaction.
    ///
    /// Rows whose uniqueness key already exists are ignored, so re-running a
    /// build is a no-op. Any other failure rolls back the whole batch.
    /// Returns the number of rows actually inserted.
    pub fn bulk_insert<'a, I>(&mut self, records: I) -> Result<usize, StoreError>
    where
        I: IntoIterator<Item = &'a GameRecord>,
    {
        let profile = self.profile();
        let conn = self.conn_mut()?;
        let inserted = insert_all(conn, profile, records).map_err(StoreError::Persistence)?;
        log::debug!("Inserted {} rows", inserted);
        Ok(inserted)
    }
}

fn insert_all<'a, I>(
    conn: &mut Connection,
    profile: GrammarProfile,
    records: I,
) -> Result<usize, rusqlite::Error>
where
    I: IntoIterator<Item = &'a GameRecord>,
{
    let tx = conn.transaction()?;
    let mut inserted = 0;
    {
        let mut stmt = match profile {
            GrammarProfile::Filename => tx.prepare(
                "INSERT OR IGNORE INTO games (name, filename, platform, hash)
                 VALUES (?1, ?2, ?3, ?4)",
            )?,
            GrammarProfile::NameOnly => tx.prepare(
                "INSERT OR IGNORE INTO games (name, platform, hash) VALUES (?1, ?2, ?3)",
            )?,
        };

        for record in records {
            let hash = record.hash.to_ascii_lowercase();
            inserted += match profile {
                GrammarProfile::Filename => stmt.execute(params![
                    record.name,
                    record.filename,
                    record.platform,
                    hash
                ])?,
                GrammarProfile::NameOnly => {
                    stmt.execute(params![record.name, record.platform, hash])?
                }
            };
        }
    }
    // Dropping `tx` without commit rolls back.
    tx.commit()?;
    Ok(inserted)
}
