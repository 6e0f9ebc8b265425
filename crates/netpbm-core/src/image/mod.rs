//! Image - The sample buffer and its format metadata
//!
//! `Image` is the only entity in the library. It owns a flat buffer of
//! 16-bit samples together with the width, height, color mode and the
//! declared maximum sample value.
//!
//! # Sample layout
//!
//! - Bitmap and grayscale images hold one sample per pixel, row-major:
//!   `index = y * width + x`
//! - Color images are stored channel-major: every red sample first, then
//!   every green sample, then every blue sample:
//!   `index = plane * width * height + y * width + x`
//! - No stored sample ever exceeds [`Image::max_sample`]
//!
//! # Ownership model
//!
//! `Image` is a plain owned value. Mutation goes through `&mut self`, so
//! the borrow checker provides the single-writer discipline. Fields are
//! private: pixel data can only be changed through the setters and the
//! conversions in [`convert`].

mod access;
pub mod convert;

pub use access::SampleWrite;

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Color mode of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// 1 bit per pixel, max sample always 1 (PBM)
    Bitmap,
    /// Single gray channel (PGM)
    Grayscale,
    /// Red, green and blue channels (PPM)
    Color,
}

impl Mode {
    /// Number of sample planes for this mode.
    pub fn channels(self) -> usize {
        match self {
            Mode::Bitmap | Mode::Grayscale => 1,
            Mode::Color => 3,
        }
    }

    /// Short name used on the command line (`bit`, `gray`, `rgb`).
    pub fn name(self) -> &'static str {
        match self {
            Mode::Bitmap => "bit",
            Mode::Grayscale => "gray",
            Mode::Color => "rgb",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bit" => Ok(Mode::Bitmap),
            "gray" => Ok(Mode::Grayscale),
            "rgb" => Ok(Mode::Color),
            _ => Err(Error::UnknownMode(s.to_string())),
        }
    }
}

/// Channel selector for pixel access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Red plane of a color image
    Red,
    /// Green plane of a color image
    Green,
    /// Blue plane of a color image
    Blue,
    /// The single plane of a bitmap or grayscale image
    Gray,
}

impl Channel {
    /// Plane index of this channel in an image of the given mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelMismatch`] when `Gray` is used on a color
    /// image or a color channel is used on a single-channel image.
    pub fn plane(self, mode: Mode) -> Result<usize> {
        match (self, mode) {
            (Channel::Gray, Mode::Bitmap | Mode::Grayscale) => Ok(0),
            (Channel::Red, Mode::Color) => Ok(0),
            (Channel::Green, Mode::Color) => Ok(1),
            (Channel::Blue, Mode::Color) => Ok(2),
            (channel, mode) => Err(Error::ChannelMismatch { channel, mode }),
        }
    }
}

/// Raster image in one of the netpbm color modes
///
/// # Examples
///
/// ```
/// use netpbm_core::{Channel, Image, Mode};
///
/// let mut image = Image::new(4, 3, Mode::Grayscale, 255).unwrap();
/// image.set(1, 2, Channel::Gray, 200).unwrap();
/// assert_eq!(image.get(1, 2, Channel::Gray).unwrap(), 200);
/// assert_eq!(image.sample_count(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    mode: Mode,
    max_sample: u16,
    samples: Vec<u16>,
}

impl Image {
    /// Create a zero-filled image.
    ///
    /// For [`Mode::Bitmap`] any `max_sample` other than 1 is replaced by 1
    /// and a warning is logged; check [`Image::max_sample`] to observe it.
    ///
    /// # Errors
    ///
    /// - [`Error::ZeroMaxSample`] if `max_sample` is 0
    /// - [`Error::SizeOverflow`] if the sample count overflows `usize`
    /// - [`Error::AllocationFailed`] if the buffer cannot be allocated
    pub fn new(width: usize, height: usize, mode: Mode, max_sample: u16) -> Result<Self> {
        let max_sample = checked_max_sample(mode, max_sample)?;
        let len = sample_count(width, height, mode)?;
        let mut samples = try_alloc(len)?;
        samples.resize(len, 0);

        Ok(Image {
            width,
            height,
            mode,
            max_sample,
            samples,
        })
    }

    /// Create an image from an existing channel-major sample buffer.
    ///
    /// Applies the same validation as [`Image::new`], then checks the
    /// buffer length and that every sample is within `max_sample`.
    ///
    /// # Errors
    ///
    /// In addition to the errors of [`Image::new`]:
    /// - [`Error::LengthMismatch`] if `samples.len()` differs from the
    ///   sample count implied by the dimensions and mode
    /// - [`Error::SampleOutOfRange`] if a sample exceeds `max_sample`
    pub fn from_samples(
        width: usize,
        height: usize,
        mode: Mode,
        max_sample: u16,
        samples: Vec<u16>,
    ) -> Result<Self> {
        let max_sample = checked_max_sample(mode, max_sample)?;
        let len = sample_count(width, height, mode)?;
        if samples.len() != len {
            return Err(Error::LengthMismatch {
                expected: len,
                actual: samples.len(),
            });
        }
        if let Some((index, &value)) = samples.iter().enumerate().find(|&(_, &v)| v > max_sample)
        {
            return Err(Error::SampleOutOfRange {
                index,
                value,
                max_sample,
            });
        }

        Ok(Image {
            width,
            height,
            mode,
            max_sample,
            samples,
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the color mode.
    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Get the declared maximum sample value.
    #[inline]
    pub fn max_sample(&self) -> u16 {
        self.max_sample
    }

    /// Total number of samples in the buffer (all planes).
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Number of pixels in one plane.
    #[inline]
    pub fn plane_len(&self) -> usize {
        // Cannot overflow: the full buffer already holds this many samples.
        self.width * self.height
    }

    /// Read-only view of the channel-major sample buffer.
    #[inline]
    pub fn samples(&self) -> &[u16] {
        &self.samples
    }
}

/// Compute `width * height * channels(mode)` without wrapping.
///
/// # Errors
///
/// Returns [`Error::SizeOverflow`] if the product does not fit in `usize`.
pub fn sample_count(width: usize, height: usize, mode: Mode) -> Result<usize> {
    let channels = mode.channels();
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(channels))
        .ok_or(Error::SizeOverflow {
            width,
            height,
            channels,
        })
}

fn checked_max_sample(mode: Mode, max_sample: u16) -> Result<u16> {
    if max_sample == 0 {
        return Err(Error::ZeroMaxSample);
    }
    if mode == Mode::Bitmap && max_sample != 1 {
        log::warn!("bitmap images have max sample 1; ignoring requested value {max_sample}");
        return Ok(1);
    }
    Ok(max_sample)
}

/// Allocate an empty buffer with room for `len` samples.
pub(crate) fn try_alloc(len: usize) -> Result<Vec<u16>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| Error::AllocationFailed(len))?;
    Ok(buf)
}
