//! Error types for diffmatch.

use thiserror::Error;

/// Result alias for diffmatch operations.
pub type DiffMatchResult<T> = std::result::Result<T, DiffMatchError>;

/// Errors that can occur when building inputs or running the correlator.
///
/// Precondition violations on the hot path (mismatched slice step counts,
/// querying candidates before a run) panic instead of returning one of these.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DiffMatchError {
    /// Width or height is zero or overflows.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// A pixel or mask buffer does not match `width * height`.
    #[error("buffer size mismatch: needed {needed}, got {got}")]
    BufferSizeMismatch { needed: usize, got: usize },
    /// A pyramid level does not halve its parent as declared.
    #[error("invalid pyramid level {level}: {reason}")]
    InvalidPyramid { level: usize, reason: &'static str },
    /// The left and right pyramids are not built with the same settings.
    #[error("pyramid mismatch: {reason}")]
    PyramidMismatch { reason: &'static str },
    /// A correlation parameter is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    /// The progress sink asked the run to stop.
    #[error("run cancelled")]
    Cancelled,
}
