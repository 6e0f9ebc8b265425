//! netpbm I/O - Reading and writing raw PBM/PGM/PPM files
//!
//! - [`read_image`] / [`read_image_mem`] - decode a file or a byte buffer
//! - [`write_image`] / [`write_image_mem`] - encode to a file or a byte buffer
//! - [`read_image_header`] - width, height and max sample without decoding
//! - [`detect_format`] - magic number detection
//!
//! All functions return [`IoResult`]. Failing to open or create a file is
//! reported as [`IoError::Io`], separate from malformed data.

pub mod error;
pub mod format;
pub mod header;
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{PnmFormat, detect_format, detect_format_from_bytes};
pub use header::{ImageHeader, bytes_per_sample, read_image_header, read_image_header_mem};
pub use pnm::{read_pnm, write_pnm};

use netpbm_core::Image;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Read an image from a file path.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let file = File::open(path)?;
    read_pnm(BufReader::new(file))
}

/// Read an image from bytes.
pub fn read_image_mem(data: &[u8]) -> IoResult<Image> {
    pnm::decode_pnm(data)
}

/// Write an image to a file path.
///
/// The format (P4, P5 or P6) follows the image mode. An existing file is
/// truncated.
pub fn write_image<P: AsRef<Path>>(image: &Image, path: P) -> IoResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_pnm(image, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write an image to bytes.
pub fn write_image_mem(image: &Image) -> IoResult<Vec<u8>> {
    pnm::encode_pnm(image)
}
