//! Table shapes for the two grammar profiles.

use rusqlite::Connection;
use romident_dat::GrammarProfile;

use crate::store::StoreError;

/// `(filename, hash)` keyed table. Filename lookups go through a NOCASE index.
const FILENAME_SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS games (
    name TEXT NOT NULL,
    filename TEXT NOT NULL,
    platform TEXT NOT NULL,
    hash TEXT NOT NULL DEFAULT '',
    UNIQUE(filename, hash)
);

CREATE INDEX IF NOT EXISTS idx_games_hash ON games(hash COLLATE NOCASE);
CREATE INDEX IF NOT EXISTS idx_games_filename ON games(filename COLLATE NOCASE);
"#;

/// `(name, platform, hash)` keyed table; no filename column.
const NAME_ONLY_SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS games (
    name TEXT NOT NULL,
    platform TEXT NOT NULL,
    hash TEXT NOT NULL DEFAULT '',
    UNIQUE(name, platform, hash)
);

CREATE INDEX IF NOT EXISTS idx_games_hash ON games(hash COLLATE NOCASE);
"#;

/// Create the `games` table and its indexes for `profile`.
///
/// Idempotent on a database that already has the same shape.
pub fn create_schema(conn: &Connection, profile: GrammarProfile) -> Result<(), StoreError> {
    let sql = match profile {
        GrammarProfile::Filename => FILENAME_SCHEMA_SQL,
        GrammarProfile::NameOnly => NAME_ONLY_SCHEMA_SQL,
    };
    conn.execute_batch(sql)?;
    Ok(())
}

/// Work out which profile an existing database was created with.
///
/// Returns `None` when there is no `games` table at all.
pub fn detect_profile(conn: &Connection) -> Result<Option<GrammarProfile>, StoreError> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('games')")?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    if columns.is_empty() {
        return Ok(None);
    }

    let has = |col: &str| columns.iter().any(|c| c.eq_ignore_ascii_case(col));
    if !(has("name") && has("platform") && has("hash")) {
        return Err(StoreError::UnrecognizedSchema(columns.join(", ")));
    }

    if has("filename") {
        Ok(Some(GrammarProfile::Filename))
    } else {
        Ok(Some(GrammarProfile::NameOnly))
    }
}
