//! Image header reading
//!
//! Provides metadata extraction from netpbm files without decoding
//! the sample stream.

use crate::format::PnmFormat;
use crate::{IoResult, pnm};
use netpbm_core::Mode;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Image metadata read without decoding pixel data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHeader {
    /// Detected sub-format
    pub format: PnmFormat,
    /// Image width in pixels
    pub width: usize,
    /// Image height in pixels
    pub height: usize,
    /// Declared max sample (1 for bitmaps)
    pub max_sample: u16,
    /// Bytes per sample in the raw stream (1 or 2)
    pub bytes_per_sample: usize,
    /// Byte offset of the first sample
    pub data_offset: usize,
}

impl ImageHeader {
    /// Color mode the image decodes to.
    pub fn mode(&self) -> Mode {
        self.format.mode()
    }
}

/// Bytes used to store one sample for a given max sample.
pub fn bytes_per_sample(max_sample: u16) -> usize {
    if max_sample < 256 { 1 } else { 2 }
}

/// Read image metadata from a file path without decoding pixel data
///
/// Only reads as far as the end of the header: buffered chunks are
/// accumulated until the header parses or the file ends.
pub fn read_image_header<P: AsRef<Path>>(path: P) -> IoResult<ImageHeader> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut data = Vec::new();
    loop {
        let chunk = reader.fill_buf()?;
        if chunk.is_empty() {
            return read_image_header_mem(&data);
        }
        let len = chunk.len();
        data.extend_from_slice(chunk);
        reader.consume(len);

        // A header that parses from a prefix parses the same from the whole file
        if let Ok(header) = read_image_header_mem(&data) {
            return Ok(header);
        }
    }
}

/// Read image metadata from bytes without decoding pixel data
pub fn read_image_header_mem(data: &[u8]) -> IoResult<ImageHeader> {
    pnm::read_header_pnm(data)
}
