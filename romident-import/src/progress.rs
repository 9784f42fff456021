//! Build progress reporting.

/// Trait for receiving build progress updates.
pub trait ImportProgress {
    /// Called after each signature file is parsed (or skipped).
    fn on_file(&self, current: usize, total: usize, name: &str);

    /// Called when a phase starts (e.g., "Parsing 42 signature files").
    fn on_phase(&self, message: &str);

    /// Called when the build is complete.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn on_file(&self, _current: usize, _total: usize, _name: &str) {}
    fn on_phase(&self, _message: &str) {}
    fn on_complete(&self, _message: &str) {}
}

/// Reports through `log` in plain lines, for output that is not a terminal.
///
/// File progress is logged once per tenth of the file list rather than per
/// file, so large corpora produce about ten lines.
pub struct LogProgress;

impl ImportProgress for LogProgress {
    fn on_file(&self, current: usize, total: usize, name: &str) {
        if reaches_new_tenth(current, total) {
            log::info!("  {:>3}% ({}/{}) {}", current * 100 / total, current, total, name);
        }
    }

    fn on_phase(&self, message: &str) {
        log::info!("{}", message);
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}

/// True when file `current` (1-based) is the first to reach a new tenth of `total`.
fn reaches_new_tenth(current: usize, total: usize) -> bool {
    if total == 0 || current == 0 || current > total {
        return false;
    }
    current * 10 / total != (current - 1) * 10 / total
}

#[cfg(test)]
#[path = "tests/progress_tests.rs"]
mod tests;
