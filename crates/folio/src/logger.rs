//! Stderr backend for the `log` facade.

use colored::Colorize;
use log::{Level, LevelFilter, Log, Metadata, Record};

static LOGGER: StderrLogger = StderrLogger;

/// Format a log record for the terminal.
pub fn format_log(record: &Record) -> String {
    let level = match record.level() {
        Level::Error => "error".red().bold(),
        Level::Warn => "warn".yellow().bold(),
        Level::Info => "info".green(),
        Level::Debug => "debug".blue(),
        Level::Trace => "trace".dimmed(),
    };
    format!("{level}: {}", record.args())
}

/// Map `-v`/`-q` flags to a level filter.
pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level() && metadata.target().starts_with("folio")
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", format_log(record));
        }
    }

    fn flush(&self) {}
}

pub fn init(verbose: u8, quiet: bool) {
    // A second init (tests, embedding) keeps the first logger.
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level_for(verbose, quiet));
    }
}
