// Error taxonomy
// Soft codes travel in-band with every prediction so one bad satellite
// never aborts a batch; hard errors only reject malformed calls upfront

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Soft per-call error classification, carried on the record and in each
/// prediction as a small integer rather than raised.
///
/// Codes 1-5 invalidate the output vector (it is overwritten with NaN);
/// code 6 (decay) is a terminal physical state and keeps the last valid
/// geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// No error
    None,
    /// Mean eccentricity left [0, 1) during secular propagation
    MeanEccentricity,
    /// Mean motion became non-positive
    MeanMotion,
    /// Perturbed eccentricity left [0, 1] after periodic corrections
    PerturbedEccentricity,
    /// Semi-latus rectum became non-positive
    SemiLatusRectum,
    /// Epoch elements are sub-orbital or otherwise unpropagatable
    SubOrbital,
    /// Satellite has decayed (orbital radius below the Earth surface)
    Decayed,
}

impl ErrorCode {
    pub fn as_i32(self) -> i32 {
        match self {
            ErrorCode::None => 0,
            ErrorCode::MeanEccentricity => 1,
            ErrorCode::MeanMotion => 2,
            ErrorCode::PerturbedEccentricity => 3,
            ErrorCode::SemiLatusRectum => 4,
            ErrorCode::SubOrbital => 5,
            ErrorCode::Decayed => 6,
        }
    }

    pub fn is_ok(self) -> bool {
        self == ErrorCode::None
    }

    /// Whether the output vector for this code is trustworthy. Decay
    /// still carries the last valid geometric computation.
    pub fn output_is_valid(self) -> bool {
        matches!(self, ErrorCode::None | ErrorCode::Decayed)
    }
}

/// Upfront validation failure for batch calls: array shapes must match
/// exactly before any computation begins.
#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("time array lengths differ: {jd} Julian days vs {fraction} fractions")]
    TimeLengthMismatch { jd: usize, fraction: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(ErrorCode::None.as_i32(), 0);
        assert_eq!(ErrorCode::MeanEccentricity.as_i32(), 1);
        assert_eq!(ErrorCode::MeanMotion.as_i32(), 2);
        assert_eq!(ErrorCode::PerturbedEccentricity.as_i32(), 3);
        assert_eq!(ErrorCode::SemiLatusRectum.as_i32(), 4);
        assert_eq!(ErrorCode::SubOrbital.as_i32(), 5);
        assert_eq!(ErrorCode::Decayed.as_i32(), 6);
    }

    #[test]
    fn test_decay_keeps_output() {
        assert!(ErrorCode::Decayed.output_is_valid());
        assert!(ErrorCode::None.output_is_valid());
        assert!(!ErrorCode::SemiLatusRectum.output_is_valid());
        assert!(!ErrorCode::SubOrbital.output_is_valid());
    }

    #[test]
    fn test_shape_error_message() {
        let e = ShapeError::TimeLengthMismatch { jd: 3, fraction: 2 };
        let msg = format!("{}", e);
        assert!(msg.contains('3') && msg.contains('2'));
    }
}
