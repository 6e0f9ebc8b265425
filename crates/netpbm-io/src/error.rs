//! I/O error types
//!
//! Provides a unified error type for reading and writing netpbm files.
//! Header and stream problems map to `InvalidData`, magic numbers this
//! library does not handle map to `UnsupportedFormat`, and failures of
//! the underlying reader/writer (including opening or creating a file)
//! stay as `Io` so callers can tell them apart.

use thiserror::Error;

/// Error type for image I/O operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The magic number names a format that is not supported
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The header or sample stream is malformed
    #[error("invalid image data: {0}")]
    InvalidData(String),

    /// An error from the core library (e.g. size overflow)
    #[error("core error: {0}")]
    Core(#[from] netpbm_core::Error),
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
