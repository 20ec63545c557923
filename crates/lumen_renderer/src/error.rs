//! Error type for scene setup and image output.
//!
//! Rays that miss, absorbed paths and exhausted depth are not errors; they
//! are ordinary return values of the hit and scatter routines.

use thiserror::Error;

/// Errors that can occur while configuring or running a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Degenerate camera basis: {0}")]
    DegenerateCamera(&'static str),

    #[error("Invalid image resolution {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("Vertical field of view must lie in (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f64),

    #[error("Checker scale must be positive and finite, got {0}")]
    InvalidCheckerScale(f64),

    #[error("Failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
