use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use romident_dat::GrammarProfile;
use romident_db::{CatalogStore, PlatformCount};
use romident_import::{
    BuildOptions, BuildStats, ImportProgress, LogProgress, SilentProgress, build_catalog,
};

use crate::CliError;

/// Entry point for `build`.
///
/// The catalog is built into a temporary file next to the target and moved
/// into place only after the build succeeds, so a failed build leaves the
/// previous catalog untouched.
pub(crate) fn run_build(
    corpus: PathBuf,
    dat_dirs: Option<Vec<String>>,
    json_dirs: Option<Vec<String>>,
    db: Option<PathBuf>,
    profile: Option<GrammarProfile>,
) -> Result<(), CliError> {
    let settings = romident_lib::load_settings()?;
    let db_path = settings.resolve_database_path(db);
    let profile = settings.resolve_profile(profile);

    let mut options = BuildOptions::from(&settings);
    if let Some(dirs) = dat_dirs {
        options.dat_dirs = dirs.into_iter().map(PathBuf::from).collect();
    }
    if let Some(dirs) = json_dirs {
        options.json_dirs = dirs.into_iter().map(PathBuf::from).collect();
    }

    log::info!(
        "{}",
        "Building signature catalog".if_supports_color(Stdout, |t| t.bold())
    );
    log::info!("  Corpus:   {}", corpus.display());
    log::info!("  Database: {}", db_path.display());
    log::info!("  Profile:  {}", profile);
    crate::log_blank();

    let tmp_path = db_path.with_extension("sqlite.tmp");
    let mut store = CatalogStore::create(&tmp_path, profile)?;

    // Bar on a terminal, plain log lines when piped, nothing under --quiet.
    let bar = (log::log_enabled!(log::Level::Info) && std::io::stdout().is_terminal())
        .then(CliBuildProgress::new);
    let progress: &dyn ImportProgress = match &bar {
        Some(bar) => bar,
        None if log::log_enabled!(log::Level::Info) => &LogProgress,
        None => &SilentProgress,
    };

    let result = build_catalog(&mut store, &corpus, &options, progress)
        .map_err(CliError::from)
        .and_then(|stats| Ok((stats, store.platforms()?)));
    if let Some(bar) = &bar {
        bar.finish();
    }

    let (stats, platforms) = match result {
        Ok(summary) => summary,
        Err(e) => {
            discard_temp_catalog(&mut store, &tmp_path);
            return Err(e);
        }
    };
    store.close()?;
    std::fs::rename(&tmp_path, &db_path)?;

    print_summary(&stats, &platforms, &db_path);
    Ok(())
}

/// Close and delete a half-built catalog. Failures are logged, never
/// returned, so the error that aborted the build is the one reported.
fn discard_temp_catalog(store: &mut CatalogStore, tmp_path: &Path) {
    if let Err(e) = store.close() {
        log::warn!("Could not close {}: {}", tmp_path.display(), e);
    }
    remove_quietly(tmp_path);
}

fn remove_quietly(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        log::debug!("Could not remove {}: {}", path.display(), e);
    }
}

fn print_summary(stats: &BuildStats, platforms: &[PlatformCount], db_path: &Path) {
    crate::log_blank();
    for entry in platforms {
        log::info!("  {:>8}  {}", entry.records, entry.platform);
    }
    crate::log_blank();
    log::info!("  Files parsed:   {:>8}", stats.files_parsed);
    if stats.files_failed > 0 {
        log::info!(
            "  Files skipped:  {:>8}",
            stats
                .files_failed
                .if_supports_color(Stdout, |t| t.yellow())
        );
    }
    log::info!("  Records parsed: {:>8}", stats.records_parsed);
    log::info!("  Unique records: {:>8}", stats.unique_records);
    log::info!(
        "  Rows inserted:  {:>8}",
        stats.rows_inserted.if_supports_color(Stdout, |t| t.green())
    );
    crate::log_blank();
    log::info!(
        "Catalog written to {}",
        db_path.display().if_supports_color(Stdout, |t| t.cyan())
    );
}

/// Progress bar over signature files.
struct CliBuildProgress {
    bar: ProgressBar,
}

impl CliBuildProgress {
    fn new() -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stdout());
        let style = ProgressStyle::with_template("  {bar:40.cyan/blue} {pos}/{len} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style.progress_chars("=> "));
        Self { bar }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ImportProgress for CliBuildProgress {
    fn on_file(&self, current: usize, total: usize, name: &str) {
        self.bar.set_length(total as u64);
        self.bar.set_position(current as u64);
        self.bar.set_message(name.to_string());
    }

    fn on_phase(&self, message: &str) {
        self.bar.suspend(|| log::info!("{}", message));
    }

    fn on_complete(&self, message: &str) {
        self.finish();
        log::info!("{}", message);
    }
}
