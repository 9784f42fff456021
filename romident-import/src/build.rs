//! The catalog build pipeline.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use romident_dat::{
    GameData, GameRecord, ParsedSource, SignatureFormat, dedup_records, merge_across_batches,
    parse_signature_file,
};
use romident_db::{CatalogStore, StoreError};
use romident_lib::Settings;
use thiserror::Error;

use crate::discover::discover_files;
use crate::progress::ImportProgress;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Directory {} does not exist in corpus", .0.display())]
    MissingDirectory(PathBuf),

    #[error("Corpus root {} is not a directory", .0.display())]
    MissingCorpus(PathBuf),
}

/// Which corpus directories feed the build, relative to the corpus root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub dat_dirs: Vec<PathBuf>,
    pub json_dirs: Vec<PathBuf>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for BuildOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            dat_dirs: settings.dat_dirs.iter().map(PathBuf::from).collect(),
            json_dirs: settings.json_dirs.iter().map(PathBuf::from).collect(),
        }
    }
}

/// Statistics from one catalog build.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildStats {
    pub files_parsed: u64,
    pub files_failed: u64,
    /// Records produced by the parsers before dedup.
    pub records_parsed: u64,
    /// Records left after merge and dedup.
    pub unique_records: u64,
    /// Rows actually written (0 for records already in the store).
    pub rows_inserted: u64,
    /// Unique records per platform.
    pub per_platform: BTreeMap<String, u64>,
}

/// Parse the corpus under `root` and persist it into `store`.
///
/// The DAT grammar profile is taken from the store. Per-file parse failures
/// are logged and counted; store failures abort the build with nothing
/// committed.
pub fn build_catalog(
    store: &mut CatalogStore,
    root: &Path,
    options: &BuildOptions,
    progress: &dyn ImportProgress,
) -> Result<BuildStats, ImportError> {
    if !root.is_dir() {
        return Err(ImportError::MissingCorpus(root.to_path_buf()));
    }

    let mut files = collect_dirs(root, &options.dat_dirs, SignatureFormat::Dat)?;
    files.extend(collect_dirs(root, &options.json_dirs, SignatureFormat::Json)?);

    let profile = store.profile();
    let mut stats = BuildStats::default();
    let mut by_platform: BTreeMap<String, Vec<GameRecord>> = BTreeMap::new();
    let mut games: Vec<GameData> = Vec::new();

    progress.on_phase(&format!("Parsing {} signature files", files.len()));
    let total = files.len();
    for (i, path) in files.iter().enumerate() {
        let display_name = path
            .strip_prefix(root)
            .unwrap_or(path)
            .display()
            .to_string();

        match parse_signature_file(path, profile) {
            Ok(ParsedSource::Dat(dat)) => {
                stats.files_parsed += 1;
                if dat.skipped > 0 {
                    log::debug!("{}: skipped {} incomplete blocks", display_name, dat.skipped);
                }
                for record in dat.records {
                    by_platform
                        .entry(record.platform.clone())
                        .or_default()
                        .push(record);
                }
            }
            Ok(ParsedSource::Games(parsed)) => {
                stats.files_parsed += 1;
                games.extend(parsed);
            }
            Err(e) => {
                stats.files_failed += 1;
                log::warn!("Skipping {}: {}", display_name, e);
            }
        }
        progress.on_file(i + 1, total, &display_name);
    }

    if !games.is_empty() {
        progress.on_phase(&format!("Merging {} games from JSON signatures", games.len()));
        for game in merge_across_batches(games) {
            by_platform
                .entry(game.platform.clone())
                .or_default()
                .extend(game.records());
        }
    }

    let records: Vec<GameRecord> = by_platform.into_values().flatten().collect();
    stats.records_parsed = records.len() as u64;

    let unique = dedup_records(records, profile);
    stats.unique_records = unique.len() as u64;
    for record in &unique {
        *stats.per_platform.entry(record.platform.clone()).or_default() += 1;
    }

    progress.on_phase(&format!(
        "Inserting {} records across {} platforms",
        unique.len(),
        stats.per_platform.len()
    ));
    stats.rows_inserted = store.bulk_insert(&unique)? as u64;

    progress.on_complete(&format!(
        "Catalog build complete: {} files parsed, {} failed, {} rows inserted",
        stats.files_parsed, stats.files_failed, stats.rows_inserted
    ));
    Ok(stats)
}

fn collect_dirs(
    root: &Path,
    dirs: &[PathBuf],
    format: SignatureFormat,
) -> Result<Vec<PathBuf>, ImportError> {
    let mut files = Vec::new();
    for dir in dirs {
        let full = root.join(dir);
        if !full.is_dir() {
            return Err(ImportError::MissingDirectory(dir.clone()));
        }
        let found = discover_files(&full, format);
        log::debug!(
            "Found {} .{} files in {}",
            found.len(),
            format.extension(),
            full.display()
        );
        files.extend(found);
    }
    Ok(files)
}
