//! Error types for imkit-plot

use thiserror::Error;

/// Errors that can occur while building or exporting figures
#[derive(Debug, Error)]
pub enum PlotError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] imkit_core::Error),

    /// Encoding or writing the figure failed
    #[error("I/O error: {0}")]
    Io(#[from] imkit_io::IoError),

    /// Sampling a transform curve failed
    #[error("transform error: {0}")]
    Enhance(#[from] imkit_enhance::EnhanceError),

    /// A per-image list (titles, colors) is shorter than the image list
    #[error("configuration mismatch: {0}")]
    ConfigurationMismatch(String),

    /// Nothing to draw
    #[error("no images given")]
    EmptyInput,

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for plotting operations
pub type PlotResult<T> = Result<T, PlotError>;
