//! Process-wide logger facade
//!
//! One [`Logger`] installed by [`init`], shared by the six level-named free
//! functions. Installation is guarded: a second `init` is rejected rather
//! than silently replacing an in-use instance.

use std::panic::Location;
use std::path::PathBuf;
use std::sync::OnceLock;

use crate::config::LogConfig;
use crate::error::Error;
use crate::level::Level;
use crate::logger::Logger;

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Install the process-wide logger
///
/// Ensures `dir` exists (an empty path means `./`) and opens today's file in
/// append mode. Returns [`Error::AlreadyInitialized`] if a logger was
/// already installed.
pub fn init(dir: impl Into<PathBuf>, min_level: Level, mirror_stdout: bool) -> Result<(), Error> {
    init_with_config(LogConfig::new(dir, min_level, mirror_stdout))
}

/// Install the process-wide logger from a prepared configuration
pub fn init_with_config(config: LogConfig) -> Result<(), Error> {
    let logger = Logger::new(config)?;
    LOGGER.set(logger).map_err(|_| Error::AlreadyInitialized)
}

/// Get the installed logger
///
/// # Panics
///
/// Panics if [`init`] has not completed. Logging before initialization is a
/// programming error, not a recoverable condition.
pub fn logger() -> &'static Logger {
    LOGGER.get().expect("logger not initialized")
}

/// Log a message at `Debug` level on the process-wide logger
#[track_caller]
pub fn debug(message: &str) {
    logger().log(Level::Debug, Location::caller(), message);
}

/// Log a message at `Trace` level on the process-wide logger
#[track_caller]
pub fn trace(message: &str) {
    logger().log(Level::Trace, Location::caller(), message);
}

/// Log a message at `Info` level on the process-wide logger
#[track_caller]
pub fn info(message: &str) {
    logger().log(Level::Info, Location::caller(), message);
}

/// Log a message at `Warn` level on the process-wide logger
#[track_caller]
pub fn warn(message: &str) {
    logger().log(Level::Warn, Location::caller(), message);
}

/// Log a message at `Error` level on the process-wide logger
#[track_caller]
pub fn error(message: &str) {
    logger().log(Level::Error, Location::caller(), message);
}

/// Log a message at `Fatal` level on the process-wide logger
#[track_caller]
pub fn fatal(message: &str) {
    logger().log(Level::Fatal, Location::caller(), message);
}
