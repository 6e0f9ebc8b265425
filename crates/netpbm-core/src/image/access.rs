//! Sample access functions
//!
//! Bounds-checked getters and setters, by pixel coordinates and channel
//! or by linear index into the channel-major buffer.
//!
//! Setters never store a value above the image's max sample. An
//! out-of-range value is clamped, a warning is logged and the clamp is
//! reported through [`SampleWrite`].

use super::{Channel, Image};
use crate::error::{Error, Result};

/// Outcome of a successful sample write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleWrite {
    /// The requested value was stored as-is
    Exact,
    /// The requested value exceeded the max sample and was clamped
    Clamped { requested: u16, stored: u16 },
}

impl SampleWrite {
    /// Check whether the value was clamped.
    pub fn is_clamped(self) -> bool {
        matches!(self, SampleWrite::Clamped { .. })
    }
}

impl Image {
    /// Linear buffer index of channel `channel` at (x, y).
    pub(crate) fn index_of(&self, x: usize, y: usize, channel: Channel) -> Result<usize> {
        let plane = channel.plane(self.mode)?;
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(plane * self.plane_len() + y * self.width + x)
    }

    /// Get the sample of `channel` at (x, y).
    ///
    /// # Errors
    ///
    /// - [`Error::ChannelMismatch`] if the channel does not exist in this mode
    /// - [`Error::OutOfBounds`] if `x >= width` or `y >= height`
    pub fn get(&self, x: usize, y: usize, channel: Channel) -> Result<u16> {
        let idx = self.index_of(x, y, channel)?;
        Ok(self.samples[idx])
    }

    /// Set the sample of `channel` at (x, y).
    ///
    /// Values above the max sample are clamped to it.
    ///
    /// # Errors
    ///
    /// - [`Error::ChannelMismatch`] if the channel does not exist in this mode
    /// - [`Error::OutOfBounds`] if `x >= width` or `y >= height`
    ///
    /// The buffer is left unmodified on error.
    pub fn set(&mut self, x: usize, y: usize, channel: Channel, value: u16) -> Result<SampleWrite> {
        let idx = self.index_of(x, y, channel)?;
        Ok(self.store(idx, value))
    }

    /// Get the sample at linear index `idx`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `idx >= sample_count()`.
    pub fn get_raw(&self, idx: usize) -> Result<u16> {
        self.samples
            .get(idx)
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                index: idx,
                len: self.samples.len(),
            })
    }

    /// Set the sample at linear index `idx`.
    ///
    /// Values above the max sample are clamped to it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `idx >= sample_count()`.
    pub fn set_raw(&mut self, idx: usize, value: u16) -> Result<SampleWrite> {
        if idx >= self.samples.len() {
            return Err(Error::IndexOutOfBounds {
                index: idx,
                len: self.samples.len(),
            });
        }
        Ok(self.store(idx, value))
    }

    /// Copy the whole sample buffer into `dst`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] unless `dst.len() == sample_count()`.
    pub fn clone_data(&self, dst: &mut [u16]) -> Result<()> {
        if dst.len() != self.samples.len() {
            return Err(Error::LengthMismatch {
                expected: self.samples.len(),
                actual: dst.len(),
            });
        }
        dst.copy_from_slice(&self.samples);
        Ok(())
    }

    fn store(&mut self, idx: usize, value: u16) -> SampleWrite {
        if value > self.max_sample {
            log::warn!(
                "sample {value} at index {idx} exceeds max sample {}; clamping",
                self.max_sample
            );
            self.samples[idx] = self.max_sample;
            SampleWrite::Clamped {
                requested: value,
                stored: self.max_sample,
            }
        } else {
            self.samples[idx] = value;
            SampleWrite::Exact
        }
    }
}
