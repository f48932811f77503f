//! Error types for chromapack

use thiserror::Error;

/// Result type for chromapack operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in chromapack operations
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A numeric argument fell outside its accepted range
    #[error("{what} out of range: {value} (allowed {min}..={max})")]
    Range {
        what: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },

    /// No formatter is able to handle a pixel format
    #[error("Unsupported pixel format: {0}")]
    UnsupportedFormat(String),

    /// Color space cannot be handled by the requested operation
    #[error("Unsupported color space: {0}")]
    UnsupportedColorSpace(String),

    /// Adjacent profiles in a chain do not connect
    #[error("Color space mismatch: expected {expected}, found {found}")]
    ColorSpaceMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Transform creation failed
    #[error("Transform error: {0}")]
    Transform(String),

    /// A codec tried to read or write past the end of a pixel buffer
    #[error("Buffer overrun: {needed} bytes at offset {offset}, buffer holds {len}")]
    BufferOverrun {
        offset: usize,
        needed: usize,
        len: usize,
    },

    /// Buffer size mismatch
    #[error("Buffer size mismatch: expected {expected}, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    /// A tone curve failed its monotonicity check
    #[error("Tone curve is not monotonic")]
    NonMonotonic,

    /// A tone curve could not be built from the supplied samples
    #[error("Invalid tone curve: {0}")]
    InvalidCurve(String),

    /// Temporary storage could not be reserved
    #[error("Allocation of {0} elements failed")]
    Allocation(usize),
}
