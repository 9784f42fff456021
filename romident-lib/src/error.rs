use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fingerprinting a candidate ROM.
#[derive(Debug, Error)]
pub enum HashError {
    /// The file could not be opened
    #[error("Failed to open {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading a plain file failed part-way
    #[error("I/O error while hashing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The archive container could not be read
    #[error("Failed to open archive {}: {source}", path.display())]
    ArchiveOpen {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// The archive has no entries to hash
    #[error("Archive {} contains no entries", path.display())]
    EmptyArchive { path: PathBuf },

    /// The first entry could not be opened or decompressed
    #[error("Failed to read entry '{entry}' in {}: {reason}", path.display())]
    EntryOpen {
        path: PathBuf,
        entry: String,
        reason: String,
    },
}

/// Errors from loading or saving `settings.toml`.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}
