//! Image format detection
//!
//! Detects the raw netpbm sub-format from the two-byte magic number.

use crate::{IoError, IoResult};
use netpbm_core::Mode;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Magic numbers for the raw netpbm formats
mod magic {
    pub const PBM_BINARY: &[u8; 2] = b"P4";
    pub const PGM_BINARY: &[u8; 2] = b"P5";
    pub const PPM_BINARY: &[u8; 2] = b"P6";
}

/// Raw netpbm sub-format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PnmFormat {
    /// Portable bitmap, `P4`
    Pbm,
    /// Portable graymap, `P5`
    Pgm,
    /// Portable pixmap, `P6`
    Ppm,
}

impl PnmFormat {
    /// Format used to store an image of the given mode.
    pub fn from_mode(mode: Mode) -> Self {
        match mode {
            Mode::Bitmap => PnmFormat::Pbm,
            Mode::Grayscale => PnmFormat::Pgm,
            Mode::Color => PnmFormat::Ppm,
        }
    }

    /// Image mode produced when decoding this format.
    pub fn mode(self) -> Mode {
        match self {
            PnmFormat::Pbm => Mode::Bitmap,
            PnmFormat::Pgm => Mode::Grayscale,
            PnmFormat::Ppm => Mode::Color,
        }
    }

    /// Two-byte magic number.
    pub fn magic(self) -> &'static [u8; 2] {
        match self {
            PnmFormat::Pbm => magic::PBM_BINARY,
            PnmFormat::Pgm => magic::PGM_BINARY,
            PnmFormat::Ppm => magic::PPM_BINARY,
        }
    }

    /// Whether the header carries a max sample field.
    ///
    /// Bitmaps have none; their max sample is implicitly 1.
    pub fn has_max_sample(self) -> bool {
        self != PnmFormat::Pbm
    }

    /// Get the file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            PnmFormat::Pbm => "pbm",
            PnmFormat::Pgm => "pgm",
            PnmFormat::Ppm => "ppm",
        }
    }
}

/// Detect image format from a file path
pub fn detect_format<P: AsRef<Path>>(path: P) -> IoResult<PnmFormat> {
    let mut file = File::open(path)?;
    let mut header = [0u8; 2];
    let bytes_read = file.read(&mut header)?;
    detect_format_from_bytes(&header[..bytes_read])
}

/// Detect image format from bytes
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<PnmFormat> {
    if data.len() < 2 {
        return Err(IoError::InvalidData(
            "not enough data to detect format".to_string(),
        ));
    }

    match &data[..2] {
        m if m == magic::PBM_BINARY => Ok(PnmFormat::Pbm),
        m if m == magic::PGM_BINARY => Ok(PnmFormat::Pgm),
        m if m == magic::PPM_BINARY => Ok(PnmFormat::Ppm),
        [b'P', d @ b'1'..=b'3'] => Err(IoError::UnsupportedFormat(format!(
            "plain (ASCII) netpbm P{}",
            char::from(*d)
        ))),
        m => Err(IoError::UnsupportedFormat(format!(
            "unknown magic {:?}",
            String::from_utf8_lossy(m)
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_binary_formats() {
        assert_eq!(
            detect_format_from_bytes(b"P4\n10 10\n").unwrap(),
            PnmFormat::Pbm
        );
        assert_eq!(
            detect_format_from_bytes(b"P5\n10 10\n255\n").unwrap(),
            PnmFormat::Pgm
        );
        assert_eq!(
            detect_format_from_bytes(b"P6\n10 10\n255\n").unwrap(),
            PnmFormat::Ppm
        );
    }

    #[test]
    fn test_detect_rejects_other_magic() {
        assert!(matches!(
            detect_format_from_bytes(b"P2\n"),
            Err(IoError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            detect_format_from_bytes(b"P7\n"),
            Err(IoError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            detect_format_from_bytes(b"BM"),
            Err(IoError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            detect_format_from_bytes(b"P"),
            Err(IoError::InvalidData(_))
        ));
    }

    #[test]
    fn test_mode_mapping() {
        for mode in [Mode::Bitmap, Mode::Grayscale, Mode::Color] {
            assert_eq!(PnmFormat::from_mode(mode).mode(), mode);
        }
        assert!(!PnmFormat::Pbm.has_max_sample());
        assert!(PnmFormat::Ppm.has_max_sample());
        assert_eq!(PnmFormat::Pgm.extension(), "pgm");
    }
}
