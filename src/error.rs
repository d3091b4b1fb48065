//! Error type shared by every operation in the crate.

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures reported before any buffer is touched.
///
/// Non-convergence of [`mask_distance`](crate::mask::mask_distance) is not an
/// error; it is reported as `None`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Wrong channel count or dimensionality for the operation.
    #[error("invalid shape: expected {expected}, got {actual:?}")]
    InvalidShape {
        expected: &'static str,
        actual: Vec<usize>,
    },

    /// Two inputs that must share a shape do not.
    #[error("shape mismatch: {left:?} vs {right:?}")]
    ShapeMismatch { left: Vec<usize>, right: Vec<usize> },

    /// Flat buffer length disagrees with the declared dimensions.
    #[error("size mismatch: expected {expected} elements, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Zero-sized geometry where a non-empty raster is required.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
}

impl Error {
    pub(crate) fn invalid_shape(expected: &'static str, actual: &[usize]) -> Self {
        Self::InvalidShape {
            expected,
            actual: actual.to_vec(),
        }
    }
}
