//! imkit-test - Regression test framework for imkit
//!
//! Supports three modes, selected with the `REGTEST_MODE` environment
//! variable:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files
//! - **Display**: Run tests without comparison (visual inspection)
//!
//! Test images are synthesized in memory (see [`synth`]) rather than
//! loaded from checked-in files.
//!
//! # Usage
//!
//! ```ignore
//! use imkit_test::{RegParams, synth};
//!
//! let mut rp = RegParams::new("binarize");
//! let pix = synth::make_uniform(4, 4, 100).unwrap();
//! rp.compare_values(16.0, pix.pixel_count() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod error;
mod params;
pub mod synth;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // imkit-test is at crates/imkit-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// Path of a scratch file named `name` inside the regout directory.
///
/// The directory is created if missing.
pub fn regout_path(name: &str) -> String {
    let _ = std::fs::create_dir_all(regout_dir());
    format!("{}/{}", regout_dir(), name)
}
