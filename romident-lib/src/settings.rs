//! Application settings (`~/.config/romident/settings.toml`).
//!
//! Every value can be overridden on the command line; resolution order is
//! always CLI flag, then settings file, then the built-in default.

use std::path::{Path, PathBuf};

use romident_dat::GrammarProfile;
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// DAT directories read from a libretro-database checkout.
pub const DEFAULT_DAT_DIRS: &[&str] = &["metadat/no-intro", "metadat/fbneo-split"];

pub const DEFAULT_DATABASE_FILE: &str = "romident.sqlite";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Catalog database location. `None` means the platform data directory.
    pub database_path: Option<PathBuf>,
    /// Grammar profile used for builds and for new databases.
    pub profile: GrammarProfile,
    /// DAT directories, relative to the corpus root.
    pub dat_dirs: Vec<String>,
    /// JSON signature directories, relative to the corpus root.
    pub json_dirs: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: None,
            profile: GrammarProfile::default(),
            dat_dirs: DEFAULT_DAT_DIRS.iter().map(|s| s.to_string()).collect(),
            json_dirs: Vec::new(),
        }
    }
}

impl Settings {
    /// Database path: CLI override, then `database_path`, then the default location.
    pub fn resolve_database_path(&self, cli_override: Option<PathBuf>) -> PathBuf {
        cli_override
            .or_else(|| self.database_path.clone())
            .unwrap_or_else(default_database_path)
    }

    pub fn resolve_profile(&self, cli_override: Option<GrammarProfile>) -> GrammarProfile {
        cli_override.unwrap_or(self.profile)
    }
}

/// Canonical path to the settings file: `~/.config/romident/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("romident").join("settings.toml")
}

/// `<data dir>/romident/romident.sqlite`, or the working directory if there is no data dir.
pub fn default_database_path() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join("romident").join(DEFAULT_DATABASE_FILE),
        None => PathBuf::from(DEFAULT_DATABASE_FILE),
    }
}

/// Load settings from the canonical path. A missing file yields the defaults.
pub fn load_settings() -> Result<Settings, SettingsError> {
    load_settings_from(&settings_path())
}

pub fn load_settings_from(path: &Path) -> Result<Settings, SettingsError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No settings file at {}, using defaults", path.display());
            Ok(Settings::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// Write settings atomically (temp file + rename).
pub fn save_settings_to(settings: &Settings, path: &Path) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(settings)?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// The effective settings as pretty-printed TOML, for display.
pub fn settings_to_string(settings: &Settings) -> Result<String, SettingsError> {
    Ok(toml::to_string_pretty(settings)?)
}
