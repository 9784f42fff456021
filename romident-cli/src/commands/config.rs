use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use romident_dat::GrammarProfile;
use romident_lib::Settings;

use crate::CliError;

/// Show the effective settings and where each value came from.
pub(crate) fn run_config_show(
    db: Option<PathBuf>,
    profile: Option<GrammarProfile>,
) -> Result<(), CliError> {
    let path = romident_lib::settings_path();
    let file_exists = path.exists();
    let settings = romident_lib::load_settings()?;

    log::info!(
        "{}",
        "romident Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    if file_exists {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    crate::log_blank();

    let db_source = source_label(db.is_some(), settings.database_path.is_some());
    let profile_source = source_label(
        profile.is_some(),
        settings.profile != GrammarProfile::default(),
    );
    let db_path = settings.resolve_database_path(db);
    let profile = settings.resolve_profile(profile);

    log::info!(
        "  {:<14} {} {}",
        "database_path",
        db_path.display(),
        db_source.if_supports_color(Stdout, |t| t.dimmed()),
    );
    log::info!(
        "  {:<14} {} {}",
        "profile",
        profile,
        profile_source.if_supports_color(Stdout, |t| t.dimmed()),
    );
    log::info!("  {:<14} {}", "dat_dirs", list_or_none(&settings.dat_dirs));
    log::info!("  {:<14} {}", "json_dirs", list_or_none(&settings.json_dirs));

    Ok(())
}

/// Write a settings file containing the defaults.
pub(crate) fn run_config_init(force: bool) -> Result<(), CliError> {
    let path = romident_lib::settings_path();
    if path.exists() && !force {
        log::warn!(
            "Settings file already exists at {} (use --force to overwrite)",
            path.display()
        );
        return Ok(());
    }

    let settings = Settings::default();
    romident_lib::save_settings_to(&settings, &path)?;
    log::info!("Wrote {}", path.display().if_supports_color(Stdout, |t| t.cyan()));
    log::info!("{}", romident_lib::settings_to_string(&settings)?.trim_end());
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    log::info!("{}", romident_lib::settings_path().display());
    Ok(())
}

fn source_label(from_cli: bool, from_file: bool) -> &'static str {
    if from_cli {
        "(command line)"
    } else if from_file {
        "(settings.toml)"
    } else {
        "(default)"
    }
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}
