//! Error type of the facade

use thiserror::Error;

/// Any error raised by an imkit crate
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] imkit_core::Error),

    /// The file could not be opened or decoded
    #[error(transparent)]
    Io(#[from] imkit_io::IoError),

    #[error(transparent)]
    Enhance(#[from] imkit_enhance::EnhanceError),

    #[error(transparent)]
    Plot(#[from] imkit_plot::PlotError),
}

/// Result type of the facade
pub type Result<T> = std::result::Result<T, Error>;
