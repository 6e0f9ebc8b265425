//! Regression test parameters and checks

use crate::error::TestResult;
use crate::regout_path;
use netpbm_core::Image;
use std::fmt::Debug;
use std::fs;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Failed checks fail the test (default)
    #[default]
    Compare,
    /// Failed checks are printed but not counted
    Display,
}

impl RegTestMode {
    /// Read the mode from `REGTEST_MODE`
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("REGTEST_MODE").unwrap_or_default())
    }

    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("display") {
            Self::Display
        } else {
            Self::Compare
        }
    }
}

/// State of one regression test
///
/// Every check bumps a running index so a failure message points at the
/// exact check that went wrong. Failures are collected and reported by
/// [`RegParams::cleanup`].
pub struct RegParams {
    /// Name of the test (e.g., "pnmio")
    pub test_name: String,
    index: usize,
    /// Compare or display
    pub mode: RegTestMode,
    failures: Vec<String>,
}

impl RegParams {
    /// Start a regression test, reading the mode from `REGTEST_MODE`.
    pub fn new(test_name: &str) -> Self {
        Self::with_mode(test_name, RegTestMode::from_env())
    }

    /// Start a regression test in an explicit mode.
    pub fn with_mode(test_name: &str, mode: RegTestMode) -> Self {
        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            failures: Vec::new(),
        }
    }

    /// Index of the most recent check
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    /// Record a condition that must hold.
    pub fn check(&mut self, ok: bool, what: &str) -> bool {
        self.index += 1;
        if !ok {
            self.fail(format!("{} does not hold", what));
        }
        ok
    }

    /// Compare two values for equality.
    pub fn compare_values<T: PartialEq + Debug>(&mut self, expected: T, actual: T) -> bool {
        self.index += 1;
        if expected != actual {
            self.fail(format!("expected {:?}, got {:?}", expected, actual));
            return false;
        }
        true
    }

    /// Compare two images for exact equality
    ///
    /// Width, height, mode, max sample and every sample must match.
    pub fn compare_images(&mut self, image1: &Image, image2: &Image) -> bool {
        self.index += 1;

        let shape1 = (image1.width(), image1.height(), image1.mode(), image1.max_sample());
        let shape2 = (image2.width(), image2.height(), image2.mode(), image2.max_sample());
        if shape1 != shape2 {
            self.fail(format!("image shape {:?} vs {:?}", shape1, shape2));
            return false;
        }

        let mismatch = image1
            .samples()
            .iter()
            .zip(image2.samples())
            .position(|(a, b)| a != b);
        if let Some(idx) = mismatch {
            self.fail(format!("sample mismatch at {}", idx));
            return false;
        }
        true
    }

    /// Compare two encoded byte streams.
    pub fn compare_bytes(&mut self, expected: &[u8], actual: &[u8]) -> bool {
        self.index += 1;
        if expected == actual {
            return true;
        }
        let first = expected
            .iter()
            .zip(actual)
            .position(|(a, b)| a != b)
            .unwrap_or(expected.len().min(actual.len()));
        self.fail(format!(
            "byte streams differ at offset {} (sizes {} vs {})",
            first,
            expected.len(),
            actual.len()
        ));
        false
    }

    /// Write bytes to `<test>.<index>.<ext>` in the regout directory.
    ///
    /// Returns the path of the written file.
    pub fn write_data(&mut self, data: &[u8], ext: &str) -> TestResult<String> {
        self.index += 1;

        let path = regout_path(&format!("{}.{:02}.{}", self.test_name, self.index, ext))?;
        fs::write(&path, data)?;
        if self.display() {
            eprintln!("Wrote: {}", path);
        }
        Ok(path)
    }

    /// Report results; `true` if no check failed.
    pub fn cleanup(self) -> bool {
        let success = self.is_success();
        if success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();
        success
    }

    /// Check if every check so far has passed
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Recorded failure messages
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    fn fail(&mut self, detail: String) {
        let msg = format!("Failure in {}_reg, check {}: {}", self.test_name, self.index, detail);
        eprintln!("{}", msg);
        if !self.display() {
            self.failures.push(msg);
        }
    }
}
