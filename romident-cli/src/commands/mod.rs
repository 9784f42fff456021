pub(crate) mod build;
pub(crate) mod config;
pub(crate) mod hash;
pub(crate) mod lookup;

use romident_dat::GameRecord;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

/// Print a matched catalog record.
pub(crate) fn print_record(record: &GameRecord) {
    log::info!("{}", record.name.if_supports_color(Stdout, |t| t.bold()));
    log::info!(
        "  Platform: {}",
        record.platform.if_supports_color(Stdout, |t| t.cyan())
    );
    if !record.filename.is_empty() {
        log::info!("  Filename: {}", record.filename);
    }
    if !record.hash.is_empty() {
        log::info!(
            "  SHA-1:    {}",
            record.hash.if_supports_color(Stdout, |t| t.dimmed())
        );
    }
}
