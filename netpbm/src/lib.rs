//! netpbm - Raw PBM/PGM/PPM images for Rust
//!
//! # Overview
//!
//! - In-memory images in bitmap, grayscale or color mode with
//!   bounds-checked sample access
//! - Lossless reading and writing of the raw `P4`/`P5`/`P6` encodings,
//!   with 8-bit and 16-bit samples
//! - Conversion between bitmap, grayscale and color
//!
//! # Example
//!
//! ```
//! use netpbm::{Channel, Image, Mode};
//!
//! let mut image = Image::new(2, 2, Mode::Color, 255).unwrap();
//! image.set(0, 0, Channel::Red, 90).unwrap();
//! image.to_gray().unwrap();
//! assert_eq!(image.get(0, 0, Channel::Gray).unwrap(), 30);
//!
//! let bytes = netpbm::io::write_image_mem(&image).unwrap();
//! let restored = netpbm::io::read_image_mem(&bytes).unwrap();
//! assert_eq!(restored, image);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use netpbm_core::*;

// Re-export the codec as a module to keep its error type separate
pub use netpbm_io as io;
pub use netpbm_io::{read_image, write_image};
