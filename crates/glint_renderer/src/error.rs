//! Errors raised while handing pixels to an output sink.
//!
//! Tracing itself never fails; everything here comes from the output side.

use thiserror::Error;

/// Errors that can occur while writing a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Pixel written before the sink was started")]
    SinkNotStarted,

    #[error("Too many pixels written: image holds {expected}")]
    PixelOverflow { expected: usize },

    #[error("Image closed after {written} of {expected} pixels")]
    Incomplete { written: usize, expected: usize },
}

/// Result type for render output operations.
pub type RenderResult<T> = Result<T, RenderError>;
