//! Minimal stderr logger for the command-line tool.
//!
//! Each record is written on one line as `<local time> <LEVEL> <module>: <message>`.
use std::io::Write;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

pub struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    /// Map the number of `-v` flags to a level: warnings by default, then info, debug, trace.
    pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
        match verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Install the logger globally. Fails if another logger was installed first.
    pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(StderrLogger { level }))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let timepoint = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let module = record.module_path().unwrap_or("<unknown>");
        // Nothing sensible to do if stderr is gone.
        let _ = writeln!(
            std::io::stderr().lock(),
            "{timepoint} {:<5} {module}: {}",
            record.level(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
