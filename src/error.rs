//! Error types shared by every noise operation.

use thiserror::Error;

/// Failure modes of the noise operations.
///
/// Every operation validates its inputs before touching pixel data, so a
/// returned error always means the input image is untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NoiseError {
    /// A numeric parameter, or one bound of its sampling range, falls outside
    /// the domain documented for the operation.
    #[error("invalid parameter {name}: {reason}, got {value}")]
    InvalidParameter {
        name: &'static str,
        value: f32,
        reason: &'static str,
    },

    /// The input array is not a non-empty height x width x 3 sample grid.
    #[error("image shape {height}x{width}x{channels} is not a non-empty HxWx3 array")]
    ShapeMismatch {
        height: usize,
        width: usize,
        channels: usize,
    },
}

impl NoiseError {
    pub(crate) fn invalid(name: &'static str, value: f32, reason: &'static str) -> Self {
        Self::InvalidParameter { name, value, reason }
    }
}
