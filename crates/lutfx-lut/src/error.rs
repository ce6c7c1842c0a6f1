//! LUT error types.

use lutfx_icc::IccError;
use thiserror::Error;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors that can occur while building cubes and masks.
///
/// Every variant is recoverable: callers are expected to log and fall back
/// to passthrough color.
#[derive(Debug, Error)]
pub enum LutError {
    /// Device profile missing, unreadable or corrupt.
    #[error("profile error: {0}")]
    Profile(String),

    /// The color engine refused to build the transform.
    #[error("transform error: {0}")]
    Transform(String),

    /// Buffer allocation failed or its size overflowed.
    #[error("allocation error: {0}")]
    Allocation(String),

    /// Invalid cube size or mask geometry.
    #[error("invalid size: {0}")]
    InvalidSize(String),

    /// A pixel buffer does not match its declared dimensions.
    #[error("dimension mismatch: expected {expected} bytes, got {actual}")]
    DimensionMismatch {
        /// Expected byte count.
        expected: usize,
        /// Actual byte count.
        actual: usize,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<IccError> for LutError {
    fn from(err: IccError) -> Self {
        match err {
            IccError::TransformFailed(msg) => LutError::Transform(msg),
            other => LutError::Profile(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icc_error_mapping() {
        let e: LutError = IccError::LoadFailed("x.icc".into()).into();
        assert!(matches!(e, LutError::Profile(_)));

        let e: LutError = IccError::InvalidProfile("bad".into()).into();
        assert!(matches!(e, LutError::Profile(_)));

        let e: LutError = IccError::TransformFailed("no".into()).into();
        assert!(matches!(e, LutError::Transform(ref m) if m == "no"));
    }
}
