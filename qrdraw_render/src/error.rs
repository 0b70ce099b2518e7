use thiserror::Error;

use qrdraw_core::OptionsError;
use qrdraw_encode::EncodingError;

/// Errors raised by a drawing surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// Surfaces need at least one pixel in each direction.
    #[error("invalid surface dimensions: width={width}, height={height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("PNG encoding error: {0}")]
    Png(String),
}

impl From<png::EncodingError> for SurfaceError {
    fn from(err: png::EncodingError) -> Self {
        SurfaceError::Png(err.to_string())
    }
}

/// Errors raised while loading the center image.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered with status {0}")]
    Status(u16),

    #[error("malformed data URL: {0}")]
    DataUrl(String),

    #[error("cannot decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// Failure reported by a caller-provided loader.
    #[error("{0}")]
    Custom(String),
}

/// Errors that fail a whole drawing operation.
#[derive(Debug, Error)]
pub enum DrawError {
    #[error(transparent)]
    Options(#[from] OptionsError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error("invalid color '{0}': {1}")]
    InvalidColor(String, String),

    #[error("invalid device pixel ratio {0}, expected a positive number")]
    InvalidDevicePixelRatio(f64),

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error("failed to load image '{url}': {source}")]
    ImageLoad {
        url: String,
        #[source]
        source: LoadError,
    },
}
