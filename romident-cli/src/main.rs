//! romident CLI
//!
//! Builds a ROM signature catalog from DAT and JSON sources and identifies
//! ROM files against it.

mod cli_types;
mod commands;
mod error;

use std::io::Write;

use clap::Parser;
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::cli_types::{Cli, Commands, ConfigAction};
pub(crate) use crate::error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let result = match cli.command {
        Commands::Build {
            corpus,
            dat_dirs,
            json_dirs,
        } => commands::build::run_build(corpus, dat_dirs, json_dirs, cli.db, cli.profile),
        Commands::Lookup { query } => commands::lookup::run_lookup(query, cli.db),
        Commands::Hash { paths } => commands::hash::run_hash(paths),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(cli.db, cli.profile),
            ConfigAction::Init { force } => commands::config::run_config_init(force),
            ConfigAction::Path => commands::config::run_config_path(),
        },
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Route `log` output to stdout. Info lines are printed bare so they read as
/// normal command output; warnings and errors get a colored level prefix.
/// `--verbose` switches to the timestamped debug format. `RUST_LOG` still
/// applies on top of the flag-derived level.
fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stdout);

    if !verbose {
        builder.format(|buf, record| match record.level() {
            Level::Info => writeln!(buf, "{}", record.args()),
            Level::Warn => writeln!(
                buf,
                "{} {}",
                "warning:".if_supports_color(Stdout, |t| t.yellow()),
                record.args()
            ),
            Level::Error => writeln!(
                buf,
                "{} {}",
                "error:".if_supports_color(Stdout, |t| t.red()),
                record.args()
            ),
            level => writeln!(buf, "[{}] {}", level, record.args()),
        });
    }

    builder.init();
}

/// Print an empty line through the logger (respects `--quiet`).
pub(crate) fn log_blank() {
    log::info!("");
}
