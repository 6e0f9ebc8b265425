//! Color mode conversion
//!
//! Conversions between [`Mode::Bitmap`], [`Mode::Grayscale`] and
//! [`Mode::Color`]:
//!
//! | from      | `to_gray`                    | `to_rgb`                      |
//! |-----------|------------------------------|-------------------------------|
//! | Bitmap    | 0/1 → 0/255, max 255         | 0/1 → 0/255 in 3 planes       |
//! | Grayscale | no-op                        | replicate into 3 planes       |
//! | Color     | `(r + g + b) / 3`, max kept  | no-op                         |
//!
//! Every conversion builds the new buffer on the side and swaps it in
//! only once it is complete, so a failed conversion leaves the image as
//! it was.

use super::{Image, Mode, sample_count, try_alloc};
use crate::error::Result;

/// Max sample of an image promoted from bitmap.
pub const PROMOTED_MAX_SAMPLE: u16 = 255;

impl Image {
    /// Convert to grayscale in place.
    ///
    /// Bitmap samples are scaled to 0/255 and the max sample becomes 255.
    /// Color samples are averaged per pixel with floor division; the max
    /// sample is kept. Grayscale images are not touched.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::AllocationFailed`] if the new buffer cannot
    /// be allocated. The image is unchanged on error.
    pub fn to_gray(&mut self) -> Result<()> {
        match self.mode {
            Mode::Grayscale => Ok(()),
            Mode::Bitmap => {
                let samples = self.promote_bitmap_plane()?;
                self.replace(Mode::Grayscale, PROMOTED_MAX_SAMPLE, samples);
                Ok(())
            }
            Mode::Color => {
                let n = self.plane_len();
                let mut samples = try_alloc(n)?;
                let (red, rest) = self.samples.split_at(n);
                let (green, blue) = rest.split_at(n);
                samples.extend(red.iter().zip(green).zip(blue).map(|((&r, &g), &b)| {
                    // The mean of three u16 values always fits in u16
                    ((u32::from(r) + u32::from(g) + u32::from(b)) / 3) as u16
                }));
                self.replace(Mode::Grayscale, self.max_sample, samples);
                Ok(())
            }
        }
    }

    /// Convert to color in place.
    ///
    /// The single plane is copied into the red, green and blue planes.
    /// Bitmap samples are first scaled to 0/255 and the max sample becomes
    /// 255. Color images are not touched.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::SizeOverflow`] if three planes do not fit in `usize`
    /// - [`crate::Error::AllocationFailed`] if the new buffer cannot be
    ///   allocated
    ///
    /// The image is unchanged on error.
    pub fn to_rgb(&mut self) -> Result<()> {
        let len = sample_count(self.width, self.height, Mode::Color)?;
        let promoted;
        let (plane, max_sample): (&[u16], u16) = match self.mode {
            Mode::Color => return Ok(()),
            Mode::Bitmap => {
                promoted = self.promote_bitmap_plane()?;
                (promoted.as_slice(), PROMOTED_MAX_SAMPLE)
            }
            Mode::Grayscale => (self.samples.as_slice(), self.max_sample),
        };

        let mut samples = try_alloc(len)?;
        for _ in 0..Mode::Color.channels() {
            samples.extend_from_slice(plane);
        }
        self.replace(Mode::Color, max_sample, samples);
        Ok(())
    }

    /// Scale a bitmap plane from 0/1 to 0/255 into a new buffer.
    fn promote_bitmap_plane(&self) -> Result<Vec<u16>> {
        let mut samples = try_alloc(self.samples.len())?;
        samples.extend(self.samples.iter().map(|&s| s * PROMOTED_MAX_SAMPLE));
        Ok(samples)
    }

    fn replace(&mut self, mode: Mode, max_sample: u16, samples: Vec<u16>) {
        log::debug!(
            "converted {}x{} image from {} (max {}) to {} (max {})",
            self.width,
            self.height,
            self.mode,
            self.max_sample,
            mode,
            max_sample
        );
        self.mode = mode;
        self.max_sample = max_sample;
        self.samples = samples;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Channel;

    fn color_2x2() -> Image {
        let samples = vec![10, 20, 30, 40, 1, 2, 3, 4, 100, 101, 102, 103];
        Image::from_samples(2, 2, Mode::Color, 255, samples).unwrap()
    }

    #[test]
    fn test_color_to_gray_floor_average() {
        let mut image = color_2x2();
        image.to_gray().unwrap();
        assert_eq!(image.mode(), Mode::Grayscale);
        assert_eq!(image.max_sample(), 255);
        assert_eq!(image.samples(), &[37, 41, 45, 49]);
    }

    #[test]
    fn test_color_to_gray_16bit_no_overflow() {
        let samples = vec![65535, 65535, 65535];
        let mut image = Image::from_samples(1, 1, Mode::Color, 65535, samples).unwrap();
        image.to_gray().unwrap();
        assert_eq!(image.samples(), &[65535]);
        assert_eq!(image.max_sample(), 65535);
    }

    #[test]
    fn test_bitmap_to_gray() {
        let mut image = Image::from_samples(3, 1, Mode::Bitmap, 1, vec![0, 1, 1]).unwrap();
        image.to_gray().unwrap();
        assert_eq!(image.mode(), Mode::Grayscale);
        assert_eq!(image.max_sample(), 255);
        assert_eq!(image.samples(), &[0, 255, 255]);
    }

    #[test]
    fn test_bitmap_to_rgb() {
        let mut image = Image::from_samples(2, 1, Mode::Bitmap, 1, vec![1, 0]).unwrap();
        image.to_rgb().unwrap();
        assert_eq!(image.mode(), Mode::Color);
        assert_eq!(image.max_sample(), 255);
        assert_eq!(image.samples(), &[255, 0, 255, 0, 255, 0]);
    }

    #[test]
    fn test_gray_to_rgb_replicates_planes() {
        let mut image = Image::from_samples(2, 2, Mode::Grayscale, 1000, vec![5, 6, 7, 999]).unwrap();
        image.to_rgb().unwrap();
        assert_eq!(image.mode(), Mode::Color);
        assert_eq!(image.max_sample(), 1000);
        for channel in [Channel::Red, Channel::Green, Channel::Blue] {
            assert_eq!(image.get(1, 1, channel).unwrap(), 999);
            assert_eq!(image.get(0, 0, channel).unwrap(), 5);
        }
    }

    #[test]
    fn test_conversion_to_current_mode_is_noop() {
        let mut gray = Image::from_samples(2, 1, Mode::Grayscale, 300, vec![299, 1]).unwrap();
        let before = gray.clone();
        gray.to_gray().unwrap();
        assert_eq!(gray, before);

        let mut color = color_2x2();
        let before = color.clone();
        color.to_rgb().unwrap();
        assert_eq!(color, before);
    }

    #[test]
    fn test_gray_rgb_gray_cycle() {
        let mut image = Image::from_samples(3, 1, Mode::Grayscale, 4000, vec![0, 17, 4000]).unwrap();
        image.to_gray().unwrap();
        image.to_rgb().unwrap();
        image.to_gray().unwrap();
        assert_eq!(image.mode(), Mode::Grayscale);
        assert_eq!((image.width(), image.height()), (3, 1));
        assert_eq!(image.max_sample(), 4000);
        assert_eq!(image.samples(), &[0, 17, 4000]);
    }
}
