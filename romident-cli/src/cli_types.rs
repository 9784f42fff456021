//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use romident_dat::GrammarProfile;

#[derive(Parser)]
#[command(name = "romident")]
#[command(about = "Build and query a ROM signature catalog", long_about = None)]
pub(crate) struct Cli {
    /// Catalog database path (overrides settings.toml)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// DAT grammar profile: filename or name-only (overrides settings.toml)
    #[arg(long, global = true)]
    pub profile: Option<GrammarProfile>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Rebuild the catalog from a local signature corpus checkout
    Build {
        /// Root of the corpus (e.g., a libretro-database clone)
        corpus: PathBuf,

        /// DAT directories relative to the corpus root (replaces settings)
        #[arg(long, value_delimiter = ',')]
        dat_dirs: Option<Vec<String>>,

        /// JSON signature directories relative to the corpus root (replaces settings)
        #[arg(long, value_delimiter = ',')]
        json_dirs: Option<Vec<String>>,
    },

    /// Identify a ROM by file, content hash, or ROM filename
    Lookup {
        #[command(flatten)]
        query: LookupQuery,
    },

    /// Print the fingerprint of one or more files
    Hash {
        /// Files to hash (.zip archives hash their first entry)
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Manage the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// What to look up. Exactly one is required.
#[derive(Args)]
#[group(required = true, multiple = false)]
pub(crate) struct LookupQuery {
    /// ROM file to fingerprint and identify
    pub path: Option<PathBuf>,

    /// SHA-1 content hash (case-insensitive)
    #[arg(long)]
    pub hash: Option<String>,

    /// ROM filename as listed in the signature files (case-insensitive)
    #[arg(long)]
    pub file: Option<String>,
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show effective settings and where each value came from
    Show,

    /// Write a settings file with default values
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },

    /// Print the settings file path
    Path,
}
