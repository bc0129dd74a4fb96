//! Daily-rotating leveled logger
//!
//! Owns the open day file and the date it was opened for. Every log call
//! runs the full check-date, rotate-if-stale, filter, write sequence under
//! one lock, so concurrent callers never interleave a write with a handle
//! swap.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Local, NaiveDate};

use crate::clock::{Clock, SystemClock};
use crate::config::LogConfig;
use crate::error::Error;
use crate::level::Level;

/// The open day file and the date it was opened for
struct ActiveFile {
    file: File,
    opened_on: NaiveDate,
    path: PathBuf,
}

/// Leveled logger writing to one `YYYYMMDD.log` file per calendar day
///
/// Usable directly as an injected dependency, or process-wide through the
/// [`global`](crate::global) facade.
pub struct Logger {
    config: LogConfig,
    clock: Box<dyn Clock>,
    state: Mutex<ActiveFile>,
}

impl Logger {
    /// Create a logger, opening today's file in append mode
    ///
    /// Ensures the configured directory exists, creating it recursively if
    /// needed.
    pub fn new(config: LogConfig) -> Result<Self, Error> {
        Self::with_clock(config, Box::new(SystemClock))
    }

    /// Create a logger reading time from the given clock
    pub fn with_clock(config: LogConfig, clock: Box<dyn Clock>) -> Result<Self, Error> {
        let today = clock.now().date_naive();
        let active = open_day_file(&config.dir, today)?;
        Ok(Self {
            config,
            clock,
            state: Mutex::new(active),
        })
    }

    /// Get the logger configuration
    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Get the path of the file currently being written
    pub fn current_path(&self) -> PathBuf {
        self.state
            .lock()
            .map(|state| state.path.clone())
            .unwrap_or_default()
    }

    /// Log a message at `Debug` level
    #[track_caller]
    pub fn debug(&self, message: &str) {
        self.log(Level::Debug, Location::caller(), message);
    }

    /// Log a message at `Trace` level
    #[track_caller]
    pub fn trace(&self, message: &str) {
        self.log(Level::Trace, Location::caller(), message);
    }

    /// Log a message at `Info` level
    #[track_caller]
    pub fn info(&self, message: &str) {
        self.log(Level::Info, Location::caller(), message);
    }

    /// Log a message at `Warn` level
    #[track_caller]
    pub fn warn(&self, message: &str) {
        self.log(Level::Warn, Location::caller(), message);
    }

    /// Log a message at `Error` level
    #[track_caller]
    pub fn error(&self, message: &str) {
        self.log(Level::Error, Location::caller(), message);
    }

    /// Log a message at `Fatal` level
    #[track_caller]
    pub fn fatal(&self, message: &str) {
        self.log(Level::Fatal, Location::caller(), message);
    }

    /// Log a message at `level`, attributed to `caller`
    ///
    /// The level check happens after the day check, so a date change rotates
    /// the file even when the message itself is filtered out. Write failures
    /// are absorbed; logging never fails out of the caller's control flow.
    pub fn log(&self, level: Level, caller: &Location<'_>, message: &str) {
        if let Ok(mut state) = self.state.lock() {
            let now = self.clock.now();
            let today = now.date_naive();
            if state.opened_on != today {
                self.rotate(&mut state, today, now);
            }
            if level < self.config.min_level {
                return;
            }
            let line = format_line(now, level, caller, message);
            if self.config.mirror_stdout {
                let _ = io::stdout().write_all(line.as_bytes());
            }
            let _ = state.file.write_all(line.as_bytes());
        }
    }

    /// Point the state at a fresh file for `today`
    ///
    /// On failure the previous handle stays in place, date-stale, and gets a
    /// diagnostic line instead; a later call will retry. On success the
    /// previous handle is dropped here, under the lock, so no writer can be
    /// mid-write on it.
    fn rotate(&self, state: &mut ActiveFile, today: NaiveDate, now: DateTime<Local>) {
        match open_day_file(&self.config.dir, today) {
            Ok(next) => *state = next,
            Err(err) => {
                let line = format_line(
                    now,
                    Level::Error,
                    Location::caller(),
                    &format!("log rotation failed: {}", err),
                );
                let _ = state.file.write_all(line.as_bytes());
            }
        }
    }
}

/// File name for a calendar day, `YYYYMMDD.log`
fn day_file_name(date: NaiveDate) -> String {
    format!("{}.log", date.format("%Y%m%d"))
}

fn open_day_file(dir: &Path, date: NaiveDate) -> Result<ActiveFile, Error> {
    fs::create_dir_all(dir).map_err(|source| Error::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(day_file_name(date));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| Error::OpenFile {
            path: path.clone(),
            source,
        })?;
    Ok(ActiveFile {
        file,
        opened_on: date,
        path,
    })
}

fn format_line(now: DateTime<Local>, level: Level, caller: &Location<'_>, message: &str) -> String {
    format!(
        "[{}] [{}] [{}:{}] {}\n",
        now.format("%Y-%m-%d %H:%M:%S"),
        level.as_str(),
        caller.file(),
        caller.line(),
        message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::TimeZone;
    use tempfile::TempDir;

    /// Settable clock for driving day rollover
    struct FakeClock {
        now: Mutex<DateTime<Local>>,
    }

    impl FakeClock {
        fn at(year: i32, month: u32, day: u32, hour: u32) -> Arc<Self> {
            Arc::new(Self {
                now: Mutex::new(Local.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()),
            })
        }

        fn set(&self, year: i32, month: u32, day: u32, hour: u32) {
            *self.now.lock().unwrap() =
                Local.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap();
        }
    }

    impl Clock for Arc<FakeClock> {
        fn now(&self) -> DateTime<Local> {
            *self.now.lock().unwrap()
        }
    }

    fn logger_at(dir: &Path, min_level: Level, clock: &Arc<FakeClock>) -> Logger {
        let config = LogConfig::new(dir, min_level, false);
        Logger::with_clock(config, Box::new(Arc::clone(clock))).unwrap()
    }

    fn read_lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| l.to_string())
            .collect()
    }

    /// Pull the line number out of the `[file:line]` field
    fn caller_line_of(log_line: &str) -> u32 {
        let field = log_line.split("] [").nth(2).unwrap();
        let field = field.split(']').next().unwrap();
        field.rsplit(':').next().unwrap().parse().unwrap()
    }

    #[test]
    fn test_one_line_per_call() {
        let temp_dir = TempDir::new().unwrap();
        let clock = FakeClock::at(2024, 3, 1, 10);
        let logger = logger_at(temp_dir.path(), Level::Debug, &clock);

        logger.info("first");
        logger.warn("second");
        logger.error("third");

        let lines = read_lines(&temp_dir.path().join("20240301.log"));
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("[2024-03-01 10:00:00] [INFO] ["));
        assert!(lines[0].ends_with("] first"));
        assert!(lines[1].contains("[WARN]"));
        assert!(lines[2].contains("[ERROR]"));
        for line in &lines {
            assert!(line.contains("src/logger.rs:"), "bad caller field: {}", line);
        }
    }

    #[test]
    fn test_below_minimum_is_silent() {
        let temp_dir = TempDir::new().unwrap();
        let clock = FakeClock::at(2024, 3, 1, 10);
        let logger = logger_at(temp_dir.path(), Level::Warn, &clock);

        logger.debug("a");
        logger.trace("b");
        logger.info("c");

        let content = fs::read_to_string(temp_dir.path().join("20240301.log")).unwrap();
        assert!(content.is_empty());
    }

    #[test]
    fn test_rotation_on_day_change() {
        let temp_dir = TempDir::new().unwrap();
        let clock = FakeClock::at(2024, 3, 1, 23);
        let logger = logger_at(temp_dir.path(), Level::Debug, &clock);

        logger.info("day one");
        clock.set(2024, 3, 2, 0);
        logger.info("day two");
        logger.info("day two again");

        let old = read_lines(&temp_dir.path().join("20240301.log"));
        let new = read_lines(&temp_dir.path().join("20240302.log"));
        assert_eq!(old.len(), 1);
        assert!(old[0].ends_with("day one"));
        assert_eq!(new.len(), 2);
        assert!(new[0].starts_with("[2024-03-02 00:00:00]"));
        assert_eq!(logger.current_path(), temp_dir.path().join("20240302.log"));
    }

    #[test]
    fn test_filtered_call_still_rotates() {
        let temp_dir = TempDir::new().unwrap();
        let clock = FakeClock::at(2024, 3, 1, 12);
        let logger = logger_at(temp_dir.path(), Level::Info, &clock);

        logger.info("day one");
        clock.set(2024, 3, 2, 12);
        logger.debug("filtered");

        let new_path = temp_dir.path().join("20240302.log");
        assert!(new_path.exists());
        let content = fs::read_to_string(&new_path).unwrap();
        assert!(content.is_empty());
        assert_eq!(read_lines(&temp_dir.path().join("20240301.log")).len(), 1);
    }

    #[test]
    fn test_creates_nested_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b").join("logs");
        let clock = FakeClock::at(2024, 3, 1, 12);
        let logger = logger_at(&nested, Level::Debug, &clock);

        logger.info("hello");
        assert!(nested.join("20240301.log").exists());
    }

    #[test]
    fn test_reopening_same_day_appends() {
        let temp_dir = TempDir::new().unwrap();
        let clock = FakeClock::at(2024, 3, 1, 12);

        let logger = logger_at(temp_dir.path(), Level::Debug, &clock);
        logger.info("from first logger");
        drop(logger);

        let logger = logger_at(temp_dir.path(), Level::Debug, &clock);
        logger.info("from second logger");

        assert_eq!(read_lines(&temp_dir.path().join("20240301.log")).len(), 2);
    }

    #[test]
    fn test_caller_is_direct_call_site() {
        let temp_dir = TempDir::new().unwrap();
        let clock = FakeClock::at(2024, 3, 1, 12);
        let logger = logger_at(temp_dir.path(), Level::Debug, &clock);

        let call_line = line!() + 1;
        logger.info("direct");

        let lines = read_lines(&temp_dir.path().join("20240301.log"));
        assert_eq!(caller_line_of(&lines[0]), call_line);
    }

    #[test]
    fn test_caller_passes_through_tracked_wrapper() {
        #[track_caller]
        fn wrapped_info(logger: &Logger, message: &str) {
            logger.info(message);
        }

        let temp_dir = TempDir::new().unwrap();
        let clock = FakeClock::at(2024, 3, 1, 12);
        let logger = logger_at(temp_dir.path(), Level::Debug, &clock);

        let call_line = line!() + 1;
        wrapped_info(&logger, "wrapped");

        let lines = read_lines(&temp_dir.path().join("20240301.log"));
        assert_eq!(caller_line_of(&lines[0]), call_line);
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_rotation_keeps_previous_handle() {
        let temp_dir = TempDir::new().unwrap();
        let clock = FakeClock::at(2024, 3, 1, 12);
        let logger = logger_at(temp_dir.path(), Level::Debug, &clock);

        logger.info("day one");

        // Occupy the next day's file name with a directory so the open fails.
        fs::create_dir(temp_dir.path().join("20240302.log")).unwrap();
        clock.set(2024, 3, 2, 12);
        logger.info("after failed rotation");

        let old = read_lines(&temp_dir.path().join("20240301.log"));
        assert_eq!(old.len(), 3);
        assert!(old[0].ends_with("day one"));
        assert!(old[1].contains("[ERROR]"));
        assert!(old[1].contains("log rotation failed"));
        assert!(old[2].ends_with("after failed rotation"));
        assert_eq!(logger.current_path(), temp_dir.path().join("20240301.log"));
    }

    #[test]
    fn test_day_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(day_file_name(date), "20240301.log");
    }
}
