//! Error types for netpbm-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! the sample buffer itself.
//!
//! Clamping a sample or a bitmap max value is not an error: those
//! operations succeed and report the clamp through their return value
//! and a `log::warn!` record.

use crate::image::{Channel, Mode};
use thiserror::Error;

/// netpbm-core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Maximum sample value must be at least 1
    #[error("max sample value must be greater than 0")]
    ZeroMaxSample,

    /// Mode name is not one of `bit`, `gray`, `rgb`
    #[error("unknown image mode: {0}")]
    UnknownMode(String),

    /// Channel cannot be addressed in an image of this mode
    #[error("channel {channel:?} is not valid for {mode} images")]
    ChannelMismatch { channel: Channel, mode: Mode },

    /// Pixel coordinates outside the image
    #[error("pixel ({x}, {y}) out of bounds for {width}x{height} image")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Sample buffer size does not fit in `usize`
    #[error("image too big: {width}x{height} with {channels} channel(s)")]
    SizeOverflow {
        width: usize,
        height: usize,
        channels: usize,
    },

    /// Memory allocation failed
    #[error("memory allocation failed for {0} samples")]
    AllocationFailed(usize),

    /// Buffer length differs from the image sample count
    #[error("length mismatch: expected {expected} samples, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Supplied sample exceeds the declared maximum
    #[error("sample {value} at index {index} exceeds max sample {max_sample}")]
    SampleOutOfRange {
        index: usize,
        value: u16,
        max_sample: u16,
    },
}

/// Result type alias for netpbm-core operations
pub type Result<T> = std::result::Result<T, Error>;
