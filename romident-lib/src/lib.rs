//! Fingerprinting and settings shared by the romident front-ends.

pub mod error;
pub mod hasher;
pub mod settings;

pub use error::{HashError, SettingsError};
pub use hasher::{FileHashes, compute_hashes, fingerprint, hash_reader, is_archive};
pub use settings::{
    DEFAULT_DAT_DIRS, Settings, default_database_path, load_settings, load_settings_from,
    save_settings_to, settings_path, settings_to_string,
};
