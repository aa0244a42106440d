//! A [`log::Log`] implementation that prints records in the CLI's message
//! format. Info and debug go to stdout, warnings and errors to stderr.

use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::cli::messages::{system_message, warning_message};

struct CliLogger;

static LOGGER: CliLogger = CliLogger;

impl Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = record.args().to_string();
        match record.level() {
            Level::Error => eprintln!("{}", warning_message("error", message)),
            Level::Warn => eprintln!("{}", warning_message("warn", message)),
            Level::Info => println!("{}", system_message("relalg", message)),
            Level::Debug | Level::Trace => println!("{}", system_message("debug", message)),
        }
    }

    fn flush(&self) {}
}

pub fn init(verbose: bool) {
    //! Install the logger once. Later calls keep the first logger.

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
