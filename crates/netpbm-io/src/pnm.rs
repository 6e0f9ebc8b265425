//! PNM (Portable Any Map) format support
//!
//! Reads and writes PBM (P4), PGM (P5) and PPM (P6) raw encodings.
//! Plain (ASCII) variants, PAM and header comments are not supported.
//!
//! # File layout
//!
//! ```text
//! P5 <ws> width <ws> height <ws> max_sample <one ws byte> samples...
//! P4 <ws> width <ws> height <one ws byte> samples...
//! ```
//!
//! - Every sample takes one byte when `max_sample < 256`, otherwise two
//!   bytes, most significant first. Bitmaps store one byte per sample.
//! - PPM samples are interleaved per pixel (`r g b r g b ...`) while
//!   [`Image`] keeps them channel-major; both directions reorder.
//! - The stream must hold exactly `width * height * channels` samples.

use crate::format::{PnmFormat, detect_format_from_bytes};
use crate::header::{ImageHeader, bytes_per_sample};
use crate::{IoError, IoResult};
use netpbm_core::{Image, Mode, sample_count};
use std::io::{Read, Write};

/// Read a PNM image (P4/P5/P6) from a reader.
///
/// The whole stream is read into memory before decoding.
pub fn read_pnm<R: Read>(mut reader: R) -> IoResult<Image> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    decode_pnm(&data)
}

/// Decode a PNM image from bytes.
pub fn decode_pnm(data: &[u8]) -> IoResult<Image> {
    let header = read_header_pnm(data)?;
    let mode = header.mode();
    let count = sample_count(header.width, header.height, mode)?;
    let bps = header.bytes_per_sample;

    // Check the stream length before allocating anything from the header
    let body = &data[header.data_offset..];
    let expected = count.checked_mul(bps).ok_or_else(|| {
        IoError::InvalidData(format!(
            "sample stream size overflows: {} samples of {} bytes",
            count, bps
        ))
    })?;
    if body.len() != expected {
        return Err(IoError::InvalidData(format!(
            "expected {} bytes of sample data, found {}",
            expected,
            body.len()
        )));
    }

    let read_sample = |bytes: &[u8]| -> u16 {
        if bps == 1 {
            u16::from(bytes[0])
        } else {
            u16::from_be_bytes([bytes[0], bytes[1]])
        }
    };

    let samples: Vec<u16> = match mode {
        Mode::Bitmap | Mode::Grayscale => body.chunks_exact(bps).map(read_sample).collect(),
        Mode::Color => {
            let plane = header.width * header.height;
            let mut samples = vec![0u16; count];
            for (i, pixel) in body.chunks_exact(3 * bps).enumerate() {
                for (c, sample) in pixel.chunks_exact(bps).enumerate() {
                    samples[c * plane + i] = read_sample(sample);
                }
            }
            samples
        }
    };

    log::debug!(
        "decoded {:?} {}x{} max {} ({} byte samples)",
        header.format,
        header.width,
        header.height,
        header.max_sample,
        bps
    );

    Ok(Image::from_samples(
        header.width,
        header.height,
        mode,
        header.max_sample,
        samples,
    )?)
}

/// Parse the header of a PNM image without touching the sample stream.
pub fn read_header_pnm(data: &[u8]) -> IoResult<ImageHeader> {
    let format = detect_format_from_bytes(data)?;
    let mut parser = HeaderParser { data, pos: 2 };

    let width = parser.next_number("width")?;
    let height = parser.next_number("height")?;
    let max_sample = if format.has_max_sample() {
        let value = parser.next_number("max sample")?;
        match u16::try_from(value) {
            Ok(0) => return Err(IoError::InvalidData("max sample is 0".to_string())),
            Ok(v) => v,
            Err(_) => {
                return Err(IoError::InvalidData(format!(
                    "max sample {} exceeds 65535",
                    value
                )));
            }
        }
    } else {
        1
    };
    parser.end_of_header()?;

    Ok(ImageHeader {
        format,
        width,
        height,
        max_sample,
        bytes_per_sample: bytes_per_sample(max_sample),
        data_offset: parser.pos,
    })
}

/// Write an `Image` as raw PNM to a writer.
///
/// Chooses P4, P5 or P6 from the image mode. The max sample line is
/// omitted for bitmaps.
pub fn write_pnm<W: Write>(image: &Image, mut writer: W) -> IoResult<()> {
    let format = PnmFormat::from_mode(image.mode());
    let (width, height) = (image.width(), image.height());

    writer.write_all(format.magic())?;
    write!(writer, "\n{} {}\n", width, height)?;
    if format.has_max_sample() {
        writeln!(writer, "{}", image.max_sample())?;
    }

    let bps = bytes_per_sample(image.max_sample());
    if image.sample_count() > 0 {
        write_samples(image, bps, &mut writer)?;
    }

    log::debug!(
        "encoded {:?} {}x{} max {} ({} byte samples)",
        format,
        width,
        height,
        image.max_sample(),
        bps
    );
    Ok(())
}

/// Write the interleaved sample stream of a non-empty image, one row at a time.
fn write_samples<W: Write>(image: &Image, bps: usize, writer: &mut W) -> IoResult<()> {
    let (width, height) = (image.width(), image.height());
    let channels = image.mode().channels();
    let plane = image.plane_len();
    let samples = image.samples();

    // Bounded by the sample buffer, which already holds `height` rows
    let mut row = Vec::with_capacity(image.sample_count() / height * bps);
    for y in 0..height {
        row.clear();
        for x in 0..width {
            for c in 0..channels {
                let sample = samples[c * plane + y * width + x];
                if bps == 1 {
                    // max_sample < 256 bounds every sample
                    row.push(sample as u8);
                } else {
                    row.extend_from_slice(&sample.to_be_bytes());
                }
            }
        }
        writer.write_all(&row)?;
    }
    Ok(())
}

/// Encode an `Image` as raw PNM bytes.
pub fn encode_pnm(image: &Image) -> IoResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_pnm(image, &mut buf)?;
    Ok(buf)
}

/// Tokenizer over the ASCII header
struct HeaderParser<'a> {
    data: &'a [u8],
    pos: usize,
}

impl HeaderParser<'_> {
    /// Skip at least one whitespace byte and parse a decimal number.
    fn next_number(&mut self, field: &str) -> IoResult<usize> {
        let start = self.pos;
        while self.pos < self.data.len() && is_whitespace(self.data[self.pos]) {
            self.pos += 1;
        }
        let Some(&first) = self.data.get(self.pos) else {
            return Err(IoError::InvalidData(format!(
                "unexpected end of header before {}",
                field
            )));
        };
        if first == b'#' {
            return Err(IoError::InvalidData(
                "header comments are not supported".to_string(),
            ));
        }
        if self.pos == start || !first.is_ascii_digit() {
            return Err(IoError::InvalidData(format!(
                "unexpected byte 0x{:02x} before {}",
                first, field
            )));
        }

        let mut value: usize = 0;
        while let Some(&b) = self.data.get(self.pos) {
            if !b.is_ascii_digit() {
                break;
            }
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(usize::from(b - b'0')))
                .ok_or_else(|| IoError::InvalidData(format!("{} is too large", field)))?;
            self.pos += 1;
        }
        Ok(value)
    }

    /// Consume the single whitespace byte that separates header and samples.
    fn end_of_header(&mut self) -> IoResult<()> {
        match self.data.get(self.pos) {
            Some(&b) if is_whitespace(b) => {
                self.pos += 1;
                Ok(())
            }
            Some(&b) => Err(IoError::InvalidData(format!(
                "unexpected byte 0x{:02x} at end of header",
                b
            ))),
            None => Err(IoError::InvalidData(
                "missing separator after header".to_string(),
            )),
        }
    }
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use netpbm_core::Channel;

    #[test]
    fn test_decode_pgm_8bit() {
        let data = b"P5\n3 1\n255\n\x00\x7f\xff";
        let image = decode_pnm(data).unwrap();
        assert_eq!(image.mode(), Mode::Grayscale);
        assert_eq!(image.max_sample(), 255);
        assert_eq!(image.samples(), &[0, 127, 255]);
    }

    #[test]
    fn test_decode_pgm_16bit_big_endian() {
        let data = b"P5 2 1 65535\n\x12\x34\xff\xfe";
        let image = decode_pnm(data).unwrap();
        assert_eq!(image.samples(), &[0x1234, 0xfffe]);
    }

    #[test]
    fn test_decode_ppm_reorders_to_channel_major() {
        // Two pixels: (1, 2, 3) and (4, 5, 6)
        let data = b"P6\n2 1\n255\n\x01\x02\x03\x04\x05\x06";
        let image = decode_pnm(data).unwrap();
        assert_eq!(image.samples(), &[1, 4, 2, 5, 3, 6]);
        assert_eq!(image.get(1, 0, Channel::Green).unwrap(), 5);
    }

    #[test]
    fn test_decode_pbm_has_no_max_field() {
        let data = b"P4\n2 2\n\x00\x01\x01\x00";
        let image = decode_pnm(data).unwrap();
        assert_eq!(image.mode(), Mode::Bitmap);
        assert_eq!(image.max_sample(), 1);
        assert_eq!(image.samples(), &[0, 1, 1, 0]);
    }

    #[test]
    fn test_decode_single_separator_byte() {
        // The sample stream itself starts with a whitespace value
        let data = b"P5 2 1 255\n\n\x20";
        let image = decode_pnm(data).unwrap();
        assert_eq!(image.samples(), &[b'\n' as u16, b' ' as u16]);
    }

    #[test]
    fn test_decode_rejects_bad_length() {
        let truncated = b"P5\n2 2\n255\n\x00\x00\x00";
        assert!(matches!(
            decode_pnm(truncated),
            Err(IoError::InvalidData(_))
        ));
        let overlong = b"P5\n1 1\n255\n\x00\x00";
        assert!(matches!(decode_pnm(overlong), Err(IoError::InvalidData(_))));
        // 16-bit samples need two bytes each
        let short16 = b"P5\n2 1\n256\n\x00\x01";
        assert!(matches!(decode_pnm(short16), Err(IoError::InvalidData(_))));
    }

    #[test]
    fn test_decode_huge_header_does_not_allocate() {
        let data = b"P6\n100000000 100000000\n255\n\x00";
        assert!(decode_pnm(data).is_err());
    }

    #[test]
    fn test_decode_rejects_malformed_header() {
        let cases: &[&[u8]] = &[
            b"P5\n",
            b"P5\n2\n",
            b"P5\n2 x 255\n",
            b"P5\n# comment\n2 2\n255\n",
            b"P52 2\n255\n",
            b"P5\n2 2\n0\n",
            b"P5\n2 2\n65536\n",
            b"P5\n1 1\n255",
            b"P5\n1 1\n255x\x00",
            b"P5\n99999999999999999999999 1\n255\n",
        ];
        for &data in cases {
            assert!(
                matches!(decode_pnm(data), Err(IoError::InvalidData(_))),
                "accepted {:?}",
                String::from_utf8_lossy(data)
            );
        }
    }

    #[test]
    fn test_decode_sample_above_max() {
        let data = b"P5\n1 1\n10\n\x0b";
        assert!(matches!(decode_pnm(data), Err(IoError::Core(_))));
        let data = b"P4\n1 1\n\x02";
        assert!(matches!(decode_pnm(data), Err(IoError::Core(_))));
    }

    #[test]
    fn test_encode_pgm_16bit() {
        let image = Image::from_samples(2, 1, Mode::Grayscale, 65535, vec![0x0102, 0xfffe]).unwrap();
        let bytes = encode_pnm(&image).unwrap();
        assert_eq!(bytes, b"P5\n2 1\n65535\n\x01\x02\xff\xfe");
    }

    #[test]
    fn test_encode_ppm_interleaves() {
        let image = Image::from_samples(2, 1, Mode::Color, 255, vec![1, 4, 2, 5, 3, 6]).unwrap();
        let bytes = encode_pnm(&image).unwrap();
        assert_eq!(bytes, b"P6\n2 1\n255\n\x01\x02\x03\x04\x05\x06");
    }

    #[test]
    fn test_encode_pbm_omits_max() {
        let image = Image::from_samples(3, 1, Mode::Bitmap, 1, vec![1, 0, 1]).unwrap();
        let bytes = encode_pnm(&image).unwrap();
        assert_eq!(bytes, b"P4\n3 1\n\x01\x00\x01");
    }

    #[test]
    fn test_roundtrip_empty_image() {
        let cases = [
            (0, 5, Mode::Color, 255),
            (7, 0, Mode::Grayscale, 1000),
            (usize::MAX, 0, Mode::Grayscale, 255),
            (usize::MAX / 2, 0, Mode::Color, 255),
            (0, usize::MAX, Mode::Bitmap, 1),
        ];
        for (width, height, mode, max_sample) in cases {
            let image = Image::new(width, height, mode, max_sample).unwrap();
            let bytes = encode_pnm(&image).unwrap();
            let restored = decode_pnm(&bytes).unwrap();
            assert_eq!(restored, image);
        }
    }

    #[test]
    fn test_encode_zero_height_writes_header_only() {
        let image = Image::new(usize::MAX / 2, 0, Mode::Color, 255).unwrap();
        let expected = format!("P6\n{} 0\n255\n", usize::MAX / 2);
        assert_eq!(encode_pnm(&image).unwrap(), expected.as_bytes());
    }

    #[test]
    fn test_decode_zero_height_reencodes() {
        let data = format!("P6\n{} 0\n255\n", usize::MAX);
        let image = decode_pnm(data.as_bytes()).unwrap();
        assert_eq!((image.width(), image.height()), (usize::MAX, 0));
        assert_eq!(image.sample_count(), 0);
        assert_eq!(encode_pnm(&image).unwrap(), data.as_bytes());
    }
}
