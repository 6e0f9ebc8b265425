//! netpbm Core - Image store and mode conversion
//!
//! This crate provides the in-memory side of the netpbm library:
//!
//! - [`Image`] - Owned sample buffer with width, height, mode and max sample
//! - [`Mode`] - Bitmap, grayscale or color
//! - [`Channel`] - Channel selector for pixel access
//! - [`SampleWrite`] - Reports whether a write was clamped
//! - Mode conversion via [`Image::to_gray`] and [`Image::to_rgb`]
//!
//! Reading and writing files lives in the `netpbm-io` crate.

pub mod error;
pub mod image;

pub use error::{Error, Result};
pub use image::convert::PROMOTED_MAX_SAMPLE;
pub use image::{Channel, Image, Mode, SampleWrite, sample_count};
