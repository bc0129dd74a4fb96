//! daylog - leveled logging with daily file rotation
//!
//! Writes timestamped, call-site-annotated lines to one `YYYYMMDD.log` file
//! per calendar day, rolling over lazily on the first log call that sees a
//! new date. Lines can optionally be mirrored to standard output.
//!
//! Use a [`Logger`] directly as an injected dependency, or install one
//! process-wide with [`init`] and log through the level-named free
//! functions:
//!
//! ```no_run
//! daylog::init("/tmp/logs", daylog::Level::Info, true).unwrap();
//! daylog::info("service started");
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod global;
pub mod level;
pub mod logger;
pub mod retention;

pub use clock::{Clock, SystemClock};
pub use config::{default_logs_dir, LogConfig};
pub use error::Error;
pub use global::{debug, error, fatal, info, init, init_with_config, trace, warn};
pub use level::Level;
pub use logger::Logger;
pub use retention::{cleanup_old_logs, cleanup_old_logs_with_retention};
