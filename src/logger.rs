//! Durable run logging.
//!
//! Every run writes a human-readable, line-oriented log to a file inside
//! (by default) the target directory, one line per event:
//!
//! ```text
//! 2026-08-24 10:32:01 - file_organizer - INFO - Moved: photo.jpg -> Images/
//! ```
//!
//! There is no global logger: [`RunLogger`] is an explicit instance owned
//! by the organizer and handed to the code that needs it. INFO lines are
//! echoed to stdout and ERROR lines to stderr; DEBUG lines go to the file
//! only. Failures while writing log lines are deliberately ignored, since
//! logging must never take a run down.

use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Component name recorded in every log line.
const COMPONENT: &str = "file_organizer";

/// Severity of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Debug,
    Info,
    Error,
}

impl Level {
    fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Error => "ERROR",
        }
    }
}

/// An append-only log sink for one organizer instance.
pub struct RunLogger {
    file: File,
    path: PathBuf,
}

impl RunLogger {
    /// Opens the log file in append mode, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error if the file cannot be opened; the
    /// caller treats this as fatal since a run without its durable log
    /// would be unaccountable.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().append(true).create(true).open(path)?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// The path this logger writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Logs a line at DEBUG level (file only).
    pub fn debug(&mut self, message: &str) {
        self.write_line(Level::Debug, message);
    }

    /// Logs a line at INFO level and echoes it to stdout.
    pub fn info(&mut self, message: &str) {
        let line = self.write_line(Level::Info, message);
        println!("{}", line);
    }

    /// Logs a line at ERROR level and echoes it to stderr.
    pub fn error(&mut self, message: &str) {
        let line = self.write_line(Level::Error, message);
        eprintln!("{}", line);
    }

    fn write_line(&mut self, level: Level, message: &str) -> String {
        let line = format!(
            "{} - {} - {} - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            COMPONENT,
            level.as_str(),
            message
        );
        let _ = writeln!(self.file, "{}", line);
        line
    }
}

impl std::fmt::Debug for RunLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunLogger")
            .field("path", &self.path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_log_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let log_path = temp_dir.path().join("file_organizer.log");

        let _logger = RunLogger::open(&log_path).expect("Failed to open logger");
        assert!(log_path.exists());
    }

    #[test]
    fn test_line_format() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let log_path = temp_dir.path().join("file_organizer.log");

        let mut logger = RunLogger::open(&log_path).expect("Failed to open logger");
        logger.info("hello");
        logger.error("boom");
        logger.debug("quiet");

        let content = fs::read_to_string(&log_path).expect("Failed to read log");
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains(" - file_organizer - INFO - hello"));
        assert!(lines[1].contains(" - file_organizer - ERROR - boom"));
        assert!(lines[2].contains(" - file_organizer - DEBUG - quiet"));
    }

    #[test]
    fn test_open_appends_to_existing_log() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let log_path = temp_dir.path().join("file_organizer.log");

        {
            let mut logger = RunLogger::open(&log_path).expect("Failed to open logger");
            logger.info("first run");
        }
        {
            let mut logger = RunLogger::open(&log_path).expect("Failed to reopen logger");
            logger.info("second run");
        }

        let content = fs::read_to_string(&log_path).expect("Failed to read log");
        assert!(content.contains("first run"));
        assert!(content.contains("second run"));
    }
}
