use chrono::Local;
use log::{LevelFilter, Metadata, Record};
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use crate::error::AppError;

// The terminal belongs to the TUI, so records go to a file instead
#[derive(Debug)]
struct FileLogger {
    level: LevelFilter,
    debug_filters: Option<HashSet<String>>,
    file: Mutex<File>,
}

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if metadata.level() > self.level {
            return false;
        }
        // Debug and trace can be narrowed to a set of targets
        match &self.debug_filters {
            Some(filters) if metadata.level() >= log::Level::Debug => filters
                .iter()
                .any(|f| metadata.target().starts_with(f.as_str())),
            _ => true,
        }
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(record);
        // Write errors are dropped; logging never stops the game
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{}", line);
        }
    }

    fn flush(&self) {
        // Same as `log`: flush errors are ignored
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

fn format_record(record: &Record) -> String {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    format!(
        "{timestamp} {level:5} {target}: {message}",
        timestamp = timestamp,
        level = record.level(),
        target = record.target(),
        message = record.args()
    )
}

static LOGGER: OnceLock<FileLogger> = OnceLock::new();

/// Parses a level name, falling back to info.
pub fn parse_level(name: &str) -> LevelFilter {
    match name.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

fn parse_filters(filter: Option<&str>) -> Option<HashSet<String>> {
    filter.map(|s| {
        s.split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()
    })
}

/// Installs the file logger. `debug_filter` is a comma separated list of
/// targets (sim, app, input) that may emit debug and trace records.
pub fn init_logger(
    level: LevelFilter,
    debug_filter: Option<&str>,
    path: &Path,
) -> Result<(), AppError> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let logger = LOGGER.get_or_init(|| FileLogger {
        level,
        debug_filters: parse_filters(debug_filter),
        file: Mutex::new(file),
    });
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}
