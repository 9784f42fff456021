//! Store handle and lifecycle.

use std::path::{Path, PathBuf};

use romident_dat::GrammarProfile;
use rusqlite::Connection;
use thiserror::Error;

use crate::schema::{create_schema, detect_profile};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Lookup or insert on a store that was never opened or was closed.
    #[error("Catalog store is not open")]
    Uninitialized,

    #[error("No catalog database at {}", .0.display())]
    NotFound(PathBuf),

    #[error("Unrecognized games table (columns: {0})")]
    UnrecognizedSchema(String),

    /// The store's profile has no filename column.
    #[error("Catalog was built with the name-only profile and has no filename index")]
    FilenameNotIndexed,

    /// The bulk insert transaction failed; nothing from the batch was committed.
    #[error("Bulk insert failed, batch rolled back: {0}")]
    Persistence(#[source] rusqlite::Error),
}

/// An open catalog database.
///
/// The connection is released by [`CatalogStore::close`] or on drop. After
/// `close`, every operation returns [`StoreError::Uninitialized`].
#[derive(Debug)]
pub struct CatalogStore {
    conn: Option<Connection>,
    profile: GrammarProfile,
}

impl CatalogStore {
    /// Create a fresh catalog at `path`, replacing any existing file.
    pub fn create(path: &Path, profile: GrammarProfile) -> Result<Self, StoreError> {
        if path.exists() {
            log::info!("Removing existing catalog at {}", path.display());
            std::fs::remove_file(path)?;
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        create_schema(&conn, profile)?;
        log::debug!("Created {} catalog at {}", profile, path.display());
        Ok(Self {
            conn: Some(conn),
            profile,
        })
    }

    /// Open an existing catalog. The profile is read back from the table shape.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if !path.is_file() {
            return Err(StoreError::NotFound(path.to_path_buf()));
        }

        let conn = Connection::open(path)?;
        let profile = detect_profile(&conn)?.ok_or(StoreError::Uninitialized)?;
        Ok(Self {
            conn: Some(conn),
            profile,
        })
    }

    /// In-memory catalog with the schema for `profile`. Useful for testing.
    pub fn open_memory(profile: GrammarProfile) -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        create_schema(&conn, profile)?;
        Ok(Self {
            conn: Some(conn),
            profile,
        })
    }

    pub fn profile(&self) -> GrammarProfile {
        self.profile
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Release the connection. Closing twice is a no-op.
    pub fn close(&mut self) -> Result<(), StoreError> {
        if let Some(conn) = self.conn.take() {
            conn.close().map_err(|(_, e)| StoreError::Sqlite(e))?;
        }
        Ok(())
    }

    pub(crate) fn conn(&self) -> Result<&Connection, StoreError> {
        self.conn.as_ref().ok_or(StoreError::Uninitialized)
    }

    pub(crate) fn conn_mut(&mut self) -> Result<&mut Connection, StoreError> {
        self.conn.as_mut().ok_or(StoreError::Uninitialized)
    }
}
