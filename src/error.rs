//! Failure taxonomy for the estimation pipeline.

use thiserror::Error;

/// Errors reported by the engine, the estimators, and the high-level API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EstimationError {
    /// The dataset has fewer samples than the minimal subset size.
    #[error("insufficient data: need at least {required} samples, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// The data (or the selected subset) does not constrain the model,
    /// e.g. collinear or coincident landmarks.
    #[error("degenerate data: the samples do not constrain the model")]
    DegenerateData,

    /// The search ended without any candidate gathering enough support.
    #[error("no consensus reached after {iterations} iterations")]
    NoConsensus { iterations: usize },

    /// The settings failed validation before the search started.
    #[error("invalid settings: {0}")]
    InvalidSettings(&'static str),

    /// The two point sets cannot be paired row by row.
    #[error("mismatched point sets: {0}")]
    MismatchedPointSets(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = EstimationError::InsufficientData {
            required: 3,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "insufficient data: need at least 3 samples, got 2"
        );

        let err = EstimationError::NoConsensus { iterations: 42 };
        assert!(err.to_string().contains("42 iterations"));
    }
}
