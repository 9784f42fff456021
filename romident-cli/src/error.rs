use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Catalog database error
    #[error("Database error: {0}")]
    Store(#[from] romident_db::StoreError),

    /// Catalog build failed
    #[error("Build failed: {0}")]
    Import(#[from] romident_import::ImportError),

    /// Fingerprinting a file failed
    #[error("Hash error: {0}")]
    Hash(#[from] romident_lib::HashError),

    /// Settings file could not be read or written
    #[error("Config error: {0}")]
    Settings(#[from] romident_lib::SettingsError),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
