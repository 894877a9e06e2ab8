//! File-based logger with size-based rotation.
//!
//! Logs are written to `~/.config/startup-manager/logs/startup-manager.log`.
//! When the file exceeds the configured max size it is renamed to
//! `startup-manager.log.1` (one backup kept) and a fresh file is started.

use std::ffi::OsString;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use serde::{Deserialize, Serialize};

static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

const LOG_FILE_NAME: &str = "startup-manager.log";
const BACKUP_SUFFIX: &str = ".1";

/// Logging configuration (`[logging]` in `config.toml`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Whether file logging is enabled. Defaults to `false`.
    pub enabled: bool,
    /// Minimum log level: "debug", "info", "warn", or "error".
    pub level: String,
    /// Maximum log file size in megabytes before rotation.
    pub max_file_mb: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".into(),
            max_file_mb: 10,
        }
    }
}

/// Log severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }

    /// Parses a level name, case-insensitively. Unknown names mean `Info`.
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Self::Debug,
            "warn" | "warning" => Self::Warn,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }
}

struct Logger {
    file: File,
    path: PathBuf,
    min_level: Level,
    max_bytes: u64,
    written: u64,
}

impl Logger {
    fn open(path: PathBuf, min_level: Level, max_bytes: u64) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata().map(|m| m.len()).unwrap_or(0);
        Ok(Self {
            file,
            path,
            min_level,
            max_bytes,
            written,
        })
    }

    fn write(&mut self, level: Level, args: fmt::Arguments<'_>) {
        if level < self.min_level {
            return;
        }
        let line = format!("{} [{}] {args}\n", timestamp(), level.as_str());
        if self.file.write_all(line.as_bytes()).is_err() {
            return;
        }
        self.written += line.len() as u64;

        if self.max_bytes > 0 && self.written >= self.max_bytes {
            self.rotate();
        }
    }

    fn rotate(&mut self) {
        let _ = fs::rename(&self.path, backup_path(&self.path));
        if let Ok(f) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
        {
            self.file = f;
        }
        self.written = 0;
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Initialises the global logger. Call once at startup.
///
/// Does nothing if `config.enabled` is `false` or the log directory
/// cannot be created.
pub fn init(config: &LogConfig) {
    if !config.enabled {
        return;
    }
    let Some(dir) = crate::config::config_dir() else {
        return;
    };
    let log_dir = dir.join("logs");
    if fs::create_dir_all(&log_dir).is_err() {
        return;
    }

    let logger = match Logger::open(
        log_dir.join(LOG_FILE_NAME),
        Level::parse(&config.level),
        config.max_file_mb * 1024 * 1024,
    ) {
        Ok(l) => l,
        Err(_) => return,
    };

    let _ = LOGGER.set(Mutex::new(logger));
}

/// Writes a log line if the logger is initialised and the level is at
/// or above the configured minimum.
pub fn write(level: Level, args: fmt::Arguments<'_>) {
    let Some(mutex) = LOGGER.get() else {
        return;
    };
    let Ok(mut logger) = mutex.lock() else {
        return;
    };
    logger.write(level, args);
}

/// `HH:MM:SS` in UTC.
fn timestamp() -> String {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    format!(
        "{:02}:{:02}:{:02}",
        secs / 3600 % 24,
        secs / 60 % 60,
        secs % 60
    )
}

/// Logs at DEBUG level.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Debug, format_args!($($arg)*)) };
}

/// Logs at INFO level.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Info, format_args!($($arg)*)) };
}

/// Logs at WARN level.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Warn, format_args!($($arg)*)) };
}

/// Logs at ERROR level.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Error, format_args!($($arg)*)) };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(test: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "startup-manager-log-{test}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn level_parse_is_case_insensitive_and_defaults_to_info() {
        assert_eq!(Level::parse("DEBUG"), Level::Debug);
        assert_eq!(Level::parse("Warn"), Level::Warn);
        assert_eq!(Level::parse("error"), Level::Error);
        assert_eq!(Level::parse("verbose"), Level::Info);
    }

    #[test]
    fn lines_below_min_level_are_skipped() {
        // Arrange
        let dir = scratch_dir("filter");
        let path = dir.join(LOG_FILE_NAME);
        let mut logger = Logger::open(path.clone(), Level::Warn, 0).unwrap();

        // Act
        logger.write(Level::Info, format_args!("added MyApp"));
        logger.write(Level::Error, format_args!("error adding MyApp"));

        // Assert
        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("added MyApp"));
        assert!(content.contains("[ERROR] error adding MyApp"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn exceeding_max_size_rotates_to_backup() {
        // Arrange
        let dir = scratch_dir("rotate");
        let path = dir.join(LOG_FILE_NAME);
        let mut logger = Logger::open(path.clone(), Level::Debug, 40).unwrap();

        // Act
        logger.write(Level::Info, format_args!("first line is long enough"));
        logger.write(Level::Info, format_args!("second"));

        // Assert
        let backup = fs::read_to_string(backup_path(&path)).unwrap();
        let current = fs::read_to_string(&path).unwrap();
        assert!(backup.contains("first line"));
        assert!(current.contains("second"));
        assert!(!current.contains("first line"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn backup_path_appends_suffix() {
        let path = Path::new("logs").join(LOG_FILE_NAME);

        assert_eq!(
            backup_path(&path),
            Path::new("logs").join("startup-manager.log.1")
        );
    }
}
