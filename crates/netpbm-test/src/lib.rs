//! netpbm-test - Regression test framework for the netpbm crates
//!
//! Collects numbered checks for one regression test and reports every
//! failure at the end instead of stopping at the first one.
//!
//! # Usage
//!
//! ```ignore
//! use netpbm_test::RegParams;
//!
//! let mut rp = RegParams::new("pnmio");
//! rp.compare_values(255, image.max_sample());
//! rp.compare_images(&original, &restored);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" (default) or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use netpbm_core::Image;
use std::fs;

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // netpbm-test is at crates/netpbm-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/target/regout", workspace_root())
}

/// Get a path inside the regout directory, creating the directory
pub fn regout_path(name: &str) -> TestResult<String> {
    let dir = regout_dir();
    fs::create_dir_all(&dir)?;
    Ok(format!("{}/{}", dir, name))
}

/// Load an image written by an earlier step of a test
pub fn load_image(path: &str) -> TestResult<Image> {
    netpbm_io::read_image(path).map_err(|e| TestError::ImageLoad {
        path: path.to_string(),
        message: e.to_string(),
    })
}

/// Write an image to `path`
pub fn write_image(image: &Image, path: &str) -> TestResult<()> {
    netpbm_io::write_image(image, path).map_err(|e| TestError::ImageWrite {
        path: path.to_string(),
        message: e.to_string(),
    })
}
