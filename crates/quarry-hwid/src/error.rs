//! Error types for hardware identification.

use std::path::PathBuf;

/// Errors that can occur while obtaining the raw system-info text.
///
/// Classification itself never fails; the only fatal path is being unable
/// to read the source text in the first place.
#[derive(Debug, thiserror::Error)]
pub enum HwIdError {
    /// I/O error reading the raw system-info source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The raw system-info source does not exist.
    #[error("system-info source not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },
}

/// Result type for hardware-identification operations.
pub type Result<T> = std::result::Result<T, HwIdError>;
