//! Build the signature catalog from a local corpus checkout.
//!
//! The pipeline is: discover signature files, parse each one (skipping and
//! logging files that fail), group records per platform, merge and dedup,
//! then persist everything in one transaction.

pub mod build;
pub mod discover;
pub mod progress;

pub use build::{BuildOptions, BuildStats, ImportError, build_catalog};
pub use discover::discover_files;
pub use progress::{ImportProgress, LogProgress, SilentProgress};
