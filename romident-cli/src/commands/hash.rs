use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

/// Print `sha1  crc32  path` for each file, naming the entry hashed inside archives.
pub(crate) fn run_hash(paths: Vec<PathBuf>) -> Result<(), CliError> {
    let mut failed = 0usize;

    for path in &paths {
        match romident_lib::compute_hashes(path) {
            Ok(hashes) => {
                let entry = hashes
                    .entry
                    .as_deref()
                    .map(|e| format!(" [{}]", e))
                    .unwrap_or_default();
                log::info!(
                    "{}  {}  {}{}",
                    hashes.sha1,
                    hashes.crc32.if_supports_color(Stdout, |t| t.dimmed()),
                    path.display(),
                    entry.if_supports_color(Stdout, |t| t.dimmed()),
                );
                log::debug!("{}: {} bytes hashed", path.display(), hashes.data_size);
            }
            Err(e) => {
                failed += 1;
                log::error!("{}", e);
            }
        }
    }

    if failed > 0 {
        return Err(CliError::other(format!(
            "{} of {} files could not be hashed",
            failed,
            paths.len()
        )));
    }
    Ok(())
}
