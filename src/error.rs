//! Errors raised when a transform is built or used incorrectly.

/// Contract violations of the transform API. Numerical trouble inside an algorithm
/// (polar decomposition not converging, nearly parallel slerp) is never reported
/// here, it's resolved where it happens.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    /// The matrix isn't 4x4, or it has no inverse and none was supplied.
    #[error("invalid transform: {0}")]
    InvalidTransform(String),

    /// An animated transform needs `start < end`.
    #[error("invalid time range: start ({start}) must be before end ({end})")]
    InvalidTimeRange { start: f64, end: f64 },

    /// The operand can't be transformed by this kind of transform.
    #[error("unsupported operand: {0}")]
    UnsupportedOperand(&'static str),
}

pub type Result<T> = std::result::Result<T, TransformError>;
