use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use romident_dat::{GameRecord, GrammarProfile};
use romident_db::{CatalogStore, StoreError};

use crate::CliError;
use crate::cli_types::LookupQuery;

use super::print_record;

/// Entry point for `lookup`.
pub(crate) fn run_lookup(query: LookupQuery, db: Option<PathBuf>) -> Result<(), CliError> {
    let settings = romident_lib::load_settings()?;
    let db_path = settings.resolve_database_path(db);

    let mut store = match CatalogStore::open(&db_path) {
        Ok(store) => store,
        Err(StoreError::NotFound(path)) => {
            log::warn!("No catalog database found at {}", path.display());
            log::info!("Run 'romident build <corpus>' first.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let found = if let Some(path) = query.path {
        lookup_file(&store, &path)?
    } else if let Some(hash) = query.hash {
        store.lookup_by_hash(&hash)?
    } else if let Some(file) = query.file {
        store.lookup_by_filename(&file)?
    } else {
        None
    };

    match found {
        Some(record) => print_record(&record),
        None => log::info!("{}", "No match".if_supports_color(Stdout, |t| t.yellow())),
    }

    store.close()?;
    Ok(())
}

/// Fingerprint `path` and look it up by hash, then by its file name (and
/// archive entry name) when the catalog indexes filenames.
fn lookup_file(store: &CatalogStore, path: &Path) -> Result<Option<GameRecord>, CliError> {
    let hashes = romident_lib::compute_hashes(path)?;
    log::debug!("{}: sha1 {}", path.display(), hashes.sha1);

    if let Some(record) = store.lookup_by_hash(&hashes.sha1)? {
        return Ok(Some(record));
    }

    if store.profile() == GrammarProfile::NameOnly {
        return Ok(None);
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned());
    for candidate in file_name.iter().chain(hashes.entry.iter()) {
        if let Some(record) = store.lookup_by_filename(candidate)? {
            log::info!(
                "{}",
                format!("No hash match; matched by filename '{}'", candidate)
                    .if_supports_color(Stdout, |t| t.dimmed())
            );
            return Ok(Some(record));
        }
    }
    Ok(None)
}
