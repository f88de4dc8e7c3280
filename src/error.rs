//! Error types for pixel access, construction and the codec boundary.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by image construction, pixel access and file I/O.
///
/// Filters never return errors: a [`crate::PixelImage`] cannot be built
/// with a zero dimension, so every filter input is well formed.
#[derive(Debug, Error)]
pub enum FilterError {
    /// A pixel coordinate fell outside the image.
    #[error("pixel ({x}, {y}) is out of bounds for a {width}x{height} image")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// Zero width/height, or a channel count other than RGBA.
    #[error("invalid image dimensions {width}x{height}x{channels} (need non-zero size and 4 channels)")]
    InvalidDimensions {
        width: usize,
        height: usize,
        channels: usize,
    },

    /// Raw buffer length does not match `width * height * 4`.
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    /// Bulk replacement with a grid of a different shape.
    #[error("replacement grid has shape {actual:?}, expected {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize, usize),
        actual: (usize, usize, usize),
    },

    /// Input is not a readable image in a supported format.
    #[error("not a valid image ({origin}): {source}")]
    Decode {
        origin: String,
        #[source]
        source: image::ImageError,
    },

    /// The encoder rejected the image.
    #[error("could not encode image for {target}: {source}")]
    Encode {
        target: String,
        #[source]
        source: image::ImageError,
    },

    /// The destination could not be written.
    #[error("could not save {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A no-clobber save found something already at the destination.
    #[error("could not save {}: file already exists, select a new filename", .path.display())]
    AlreadyExists { path: PathBuf },

    /// No encoder is known for the destination's extension.
    #[error("could not save {}: unsupported image format", .path.display())]
    UnsupportedFormat { path: PathBuf },

    /// A filter name that matches none of the known filters.
    #[error("unknown filter: {0:?}")]
    UnknownFilter(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FilterError>;
