//! Module logger: build a record, render it, append it to today's file.
//!
//! A [`Logger`] owns a frozen [`LogConfig`], a zone-aware [`Clock`] and a
//! write lock. Every emit call resolves the time once, so the timestamp in
//! the line and the date in the file name always agree.
//!
//! # Thread safety
//!
//! `Logger` is `Send + Sync` and meant to be shared behind an `Arc`. Appends
//! are serialized by the write lock and issued as a single `write_all` of the
//! whole line, so concurrent callers never interleave partial lines and
//! sequential calls land in call order.

use std::{
    fmt::Display,
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::{DateTime, FixedOffset, TimeZone};
use tracing::{debug, trace};

use crate::{
    clock::{self, Clock},
    config::LogConfig,
    error::{Result, ZlogError},
    path,
    render::{self, Format},
    types::{Fields, LogLevel, LogRecord},
};

/// Field name carrying the string form of an attached error.
pub const ERROR_FIELD: &str = "error";

pub struct Logger {
    config: LogConfig,
    format: Format,
    clock: Clock,
    write_lock: Mutex<()>,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.config)
            .field("format", &self.format)
            .field("zone", &self.clock.zone().name())
            .field("pinned", &self.clock.is_pinned())
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// Build a logger, validating the time zone and creating the log
    /// directory if it does not exist.
    ///
    /// Most callers should go through
    /// [`LoggerRegistry::get_or_create`](crate::registry::LoggerRegistry::get_or_create)
    /// so each module has exactly one logger.
    pub fn new(config: LogConfig) -> Result<Self> {
        let zone = clock::parse_time_zone(&config.time_zone)?;
        fs::create_dir_all(&config.log_path)
            .map_err(|e| ZlogError::io(&config.log_path, e))?;
        debug!(
            "logger ready — module={}, dir={}, zone={zone}",
            config.module,
            config.log_path.display()
        );

        Ok(Self {
            format: Format::from_json_flag(config.json_format),
            clock: Clock::new(zone),
            write_lock: Mutex::new(()),
            config,
        })
    }

    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Clock control
    // -----------------------------------------------------------------------

    /// Pin the logger's clock to `t` for all following timestamps and file
    /// paths. The instant keeps its own offset.
    pub fn set_current_time<Z: TimeZone>(&self, t: DateTime<Z>) {
        self.clock.pin(t);
    }

    /// Go back to the wall clock.
    pub fn clear_current_time(&self) {
        self.clock.unpin();
    }

    /// Current time as the logger sees it.
    pub fn current_time(&self) -> DateTime<FixedOffset> {
        self.clock.now()
    }

    /// File the next line would be appended to.
    pub fn file_path(&self) -> PathBuf {
        path::resolve(&self.config.log_path, &self.config.module, &self.clock.now())
    }

    // -----------------------------------------------------------------------
    // Level methods
    // -----------------------------------------------------------------------

    pub fn debug(&self, message: &str, error: Option<&dyn Display>, fields: Fields) -> Result<()> {
        self.emit_level(LogLevel::Debug, message, error, fields)
    }

    pub fn info(&self, message: &str, error: Option<&dyn Display>, fields: Fields) -> Result<()> {
        self.emit_level(LogLevel::Info, message, error, fields)
    }

    /// Same as [`Logger::info`].
    pub fn log(&self, message: &str, error: Option<&dyn Display>, fields: Fields) -> Result<()> {
        self.info(message, error, fields)
    }

    pub fn warn(&self, message: &str, error: Option<&dyn Display>, fields: Fields) -> Result<()> {
        self.emit_level(LogLevel::Warning, message, error, fields)
    }

    pub fn error(&self, message: &str, error: Option<&dyn Display>, fields: Fields) -> Result<()> {
        self.emit_level(LogLevel::Error, message, error, fields)
    }

    fn emit_level(
        &self,
        level: LogLevel,
        message: &str,
        error: Option<&dyn Display>,
        mut fields: Fields,
    ) -> Result<()> {
        if let Some(error) = error {
            fields.insert(ERROR_FIELD, error.to_string());
        }
        self.emit(level.as_str(), message, fields)
    }

    // -----------------------------------------------------------------------
    // Pipeline
    // -----------------------------------------------------------------------

    /// Emit a line with an arbitrary level name.
    ///
    /// Unknown level names are written with an empty priority (and no
    /// bracket prefix in text mode) instead of failing.
    pub fn emit(&self, level: &str, message: &str, fields: Fields) -> Result<()> {
        let now = self.clock.now();
        let record = LogRecord::new(
            clock::iso_timestamp(&now),
            self.config.module.as_str(),
            level,
            message,
            fields,
        );
        let mut line = render::render(&record, self.format);
        line.push('\n');

        let path = path::resolve(&self.config.log_path, &self.config.module, &now);
        self.append(&path, line.as_bytes())
    }

    /// Append one complete line under the write lock, recreating the log
    /// directory if it disappeared since construction.
    fn append(&self, path: &Path, line: &[u8]) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fs::create_dir_all(&self.config.log_path)
                    .map_err(|e| ZlogError::io(&self.config.log_path, e))?;
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| ZlogError::io(path, e))?
            }
            Err(e) => return Err(ZlogError::io(path, e)),
        };
        file.write_all(line).map_err(|e| ZlogError::io(path, e))?;
        trace!("appended {} bytes to {}", line.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use serde_json::Value;
    use tempfile::TempDir;

    use super::*;

    fn riyadh_new_year() -> DateTime<chrono_tz::Tz> {
        chrono_tz::Asia::Riyadh
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .unwrap()
    }

    fn logger(dir: &TempDir, module: &str, json: bool) -> Logger {
        let cfg = LogConfig::for_module(module)
            .unwrap()
            .with_log_path(dir.path())
            .with_json_format(json);
        let logger = Logger::new(cfg).unwrap();
        logger.set_current_time(riyadh_new_year());
        logger
    }

    fn read_lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    fn first_json(logger: &Logger) -> Value {
        let lines = read_lines(&logger.file_path());
        serde_json::from_str(&lines[0]).unwrap()
    }

    #[test]
    fn creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let cfg = LogConfig::for_module("AUTH")
            .unwrap()
            .with_log_path(&nested);
        Logger::new(cfg).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn invalid_time_zone_fails_construction() {
        let dir = TempDir::new().unwrap();
        let cfg = LogConfig::for_module("AUTH")
            .unwrap()
            .with_log_path(dir.path())
            .with_time_zone("Not/AZone");
        assert!(matches!(Logger::new(cfg), Err(ZlogError::Config(_))));
    }

    #[test]
    fn file_name_follows_pinned_date() {
        let dir = TempDir::new().unwrap();
        let logger = logger(&dir, "TEST", true);
        assert_eq!(logger.file_path(), dir.path().join("test-2024-01-01.log"));

        logger.info("Test message", None, Fields::new()).unwrap();
        assert!(dir.path().join("test-2024-01-01.log").exists());
    }

    #[test]
    fn four_levels_four_lines_in_order() {
        let dir = TempDir::new().unwrap();
        let logger = logger(&dir, "TEST_JSON_FORMAT", true);

        logger.debug("Test message", None, Fields::new()).unwrap();
        logger.info("Test message", None, Fields::new()).unwrap();
        logger.warn("Test message", None, Fields::new()).unwrap();
        logger.error("Test message", None, Fields::new()).unwrap();

        let lines = read_lines(&logger.file_path());
        assert_eq!(lines.len(), 4);
        let expected = [
            ("DEBUG", "P10"),
            ("INFO", "P20"),
            ("WARNING", "P30"),
            ("ERROR", "P40"),
        ];
        for (line, (level, priority)) in lines.iter().zip(expected) {
            let v: Value = serde_json::from_str(line).unwrap();
            assert_eq!(v["level"], level);
            assert_eq!(v["priority"], priority);
            assert_eq!(v["message"], "Test message");
            assert_eq!(v["module"], "TEST_JSON_FORMAT");
            assert_eq!(v["timestamp"], "2024-01-01T00:00:00+03:00");
        }
    }

    #[test]
    fn attached_error_is_stringified() {
        let dir = TempDir::new().unwrap();
        let logger = logger(&dir, "TEST", true);
        let err = std::io::Error::other("Test error");

        let fields = Fields::new().with("order_id", 7);
        logger.error("Error occurred", Some(&err), fields).unwrap();

        let v = first_json(&logger);
        assert_eq!(v["error"], "Test error");
        assert_eq!(v["level"], "ERROR");
        assert_eq!(v["order_id"], 7);
    }

    #[test]
    fn log_is_info() {
        let dir = TempDir::new().unwrap();
        let logger = logger(&dir, "TEST", true);
        logger.log("hello", None, Fields::new()).unwrap();
        assert_eq!(first_json(&logger)["level"], "INFO");
    }

    #[test]
    fn text_mode_line() {
        let dir = TempDir::new().unwrap();
        let logger = logger(&dir, "TEST_TEXT_FORMAT", false);
        logger.info("Test message", None, Fields::new()).unwrap();

        let path = dir.path().join("test_text_format-2024-01-01.log");
        let line = &read_lines(&path)[0];
        for component in ["2024-01-01", "[INFO]", "Test", "Test message"] {
            assert!(line.contains(component), "{component}");
        }
        let head = "[INFO]:[P20] [2024-01-01T00:00:00+03:00] Test message ";
        assert!(line.starts_with(head), "{line}");
    }

    #[test]
    fn unknown_level_recovers() {
        let dir = TempDir::new().unwrap();
        let logger = logger(&dir, "TEST", false);
        logger.emit("NOTICE", "odd level", Fields::new()).unwrap();
        let line = &read_lines(&logger.file_path())[0];
        assert!(line.starts_with(" [2024-01-01T00:00:00+03:00] odd level"));
    }

    #[test]
    fn clearing_pin_returns_to_wall_clock() {
        let dir = TempDir::new().unwrap();
        let logger = logger(&dir, "TEST", true);
        logger.clear_current_time();
        assert_ne!(
            logger.current_time().date_naive(),
            riyadh_new_year().date_naive()
        );
    }

    #[test]
    fn debug_shows_zone_and_pin() {
        let dir = TempDir::new().unwrap();
        let logger = logger(&dir, "TEST", true);
        let shown = format!("{logger:?}");
        assert!(shown.contains("\"Asia/Riyadh\""), "{shown}");
        assert!(shown.contains("pinned: true"), "{shown}");
    }

    #[test]
    fn unwritable_path_is_io_error() {
        let dir = TempDir::new().unwrap();
        let logger = logger(&dir, "TEST", true);
        // Occupy the target file name with a directory.
        fs::create_dir(logger.file_path()).unwrap();
        let err = logger.info("x", None, Fields::new()).unwrap_err();
        assert!(matches!(err, ZlogError::Io { .. }));
    }

    #[test]
    fn removed_directory_is_recreated() {
        let dir = TempDir::new().unwrap();
        let log_dir = dir.path().join("logs");
        let cfg = LogConfig::for_module("TEST")
            .unwrap()
            .with_log_path(&log_dir);
        let logger = Logger::new(cfg).unwrap();
        fs::remove_dir(&log_dir).unwrap();

        logger.info("still here", None, Fields::new()).unwrap();
        assert!(logger.file_path().exists());
    }

    #[test]
    fn concurrent_appends_do_not_interleave() {
        const WRITERS: usize = 32;
        let dir = TempDir::new().unwrap();
        let logger = Arc::new(logger(&dir, "TEST", true));
        let padding = "x".repeat(8 * 1024);

        let handles: Vec<_> = (0..WRITERS)
            .map(|i| {
                let logger = Arc::clone(&logger);
                let padding = padding.clone();
                thread::spawn(move || {
                    let fields = Fields::new().with("writer", i).with("padding", padding);
                    logger.info(&format!("writer {i}"), None, fields).unwrap();
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let lines = read_lines(&logger.file_path());
        assert_eq!(lines.len(), WRITERS);
        let mut seen: Vec<u64> = lines
            .iter()
            .map(|l| {
                let v: Value = serde_json::from_str(l).unwrap();
                assert_eq!(v["padding"].as_str().unwrap().len(), padding.len());
                v["writer"].as_u64().unwrap()
            })
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..WRITERS as u64).collect::<Vec<_>>());
    }
}
