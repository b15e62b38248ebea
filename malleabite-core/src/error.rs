//! Error types for the malleabite layout crate.

use thiserror::Error;

/// Errors that can occur while loading events or configuration.
///
/// The layout algorithm itself never fails; every event resolves to some
/// interval. Errors only come from the edges: files, config and parsing.
#[derive(Error, Debug)]
pub enum MalleabiteError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown time zone '{0}'")]
    InvalidTimezone(String),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("Event parse error: {0}")]
    EventParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for malleabite operations.
pub type MalleabiteResult<T> = Result<T, MalleabiteError>;
