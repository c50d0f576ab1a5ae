//! Logging backend for the `hwbench` binary.
//!
//! The library only talks to the `log` facade. The binary installs a
//! [`LogCollector`] as the global logger, which writes every record to
//! stderr and, when a log file is configured, appends it there as well.
//!
//! # Format
//!
//! ```text
//! [14:03:27.512] [INFO] [Results] Normalized results/server-a (overall score 61.20)
//! ```

use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A formatted log line
#[derive(Clone, Debug)]
pub struct LogLine {
    pub timestamp: String,
    pub level: log::Level,
    pub message: String,
}

impl LogLine {
    pub fn new(level: log::Level, message: String) -> Self {
        LogLine {
            timestamp: Local::now().format("%H:%M:%S%.3f").to_string(),
            level,
            message,
        }
    }

    pub fn render(&self) -> String {
        format!("[{}] [{}] {}", self.timestamp, self.level, self.message)
    }
}

/// stderr + optional file logger
pub struct LogCollector {
    level: LevelFilter,
    file: Option<Mutex<File>>,
    file_path: Option<PathBuf>,
}

impl LogCollector {
    /// Create a collector; `log_file` is opened in append mode.
    pub fn new(level: LevelFilter, log_file: Option<&Path>) -> io::Result<Self> {
        let file = match log_file {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                Some(Mutex::new(
                    OpenOptions::new().create(true).append(true).open(path)?,
                ))
            }
            None => None,
        };

        Ok(LogCollector {
            level,
            file,
            file_path: log_file.map(Path::to_path_buf),
        })
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Write a line to every sink. Sink errors are swallowed.
    pub fn write_line(&self, line: &LogLine) {
        let rendered = line.render();
        eprintln!("{}", rendered);

        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = writeln!(file, "{}", rendered);
            }
        }
    }
}

impl Log for LogCollector {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.write_line(&LogLine::new(record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}

/// Install a [`LogCollector`] as the global logger.
///
/// Fails if the log file cannot be opened or a logger is already installed.
pub fn init_logging(level: LevelFilter, log_file: Option<&Path>) -> Result<(), String> {
    let collector = LogCollector::new(level, log_file).map_err(|e| {
        format!(
            "Failed to open log file {}: {}",
            log_file.map(|p| p.display().to_string()).unwrap_or_default(),
            e
        )
    })?;

    log::set_boxed_logger(Box::new(collector))
        .map(|()| log::set_max_level(level))
        .map_err(|e| format!("Failed to install logger: {}", e))
}
