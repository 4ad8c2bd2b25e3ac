//! Error types for imkit-enhance

use thiserror::Error;

/// Errors that can occur during intensity transforms
#[derive(Debug, Error)]
pub enum EnhanceError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] imkit_core::Error),

    /// The input makes the transform divide by zero or leave the reals
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    /// Unsupported pixel depth for this operation
    #[error("unsupported depth: expected {expected}, got {actual}")]
    UnsupportedDepth {
        /// Expected depth description
        expected: &'static str,
        /// Actual depth in bits
        actual: u32,
    },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for intensity transforms
pub type EnhanceResult<T> = Result<T, EnhanceError>;
