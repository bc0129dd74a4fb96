//! Error types for logger construction and installation

use std::io;
use std::path::PathBuf;

/// Errors surfaced by logger construction and global installation
///
/// Logging calls themselves never return errors; only setup can fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The global logger was already installed by an earlier `init` call
    #[error("logger is already initialized")]
    AlreadyInitialized,

    /// Creating the log directory failed
    #[error("failed to create log directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Opening the day's log file failed
    #[error("failed to open log file {path}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
