//! Configuration for the RANSAC engine.

use crate::error::EstimationError;

/// Configuration for a [`Ransac`](crate::core::Ransac) run.
#[derive(Debug, Clone, PartialEq)]
pub struct RansacSettings {
    /// Hard cap on the number of iterations. The adaptive bound can only
    /// shrink below this value, never grow past it.
    pub max_iterations: usize,
    /// Desired probability, in (0, 1) exclusive, that at least one drawn
    /// minimal subset is outlier free.
    pub confidence: f64,
    /// Inlier threshold: maximum residual magnitude for a sample to count as
    /// consistent with a candidate model.
    pub delta: f64,
    /// How many consecutive degenerate draws to tolerate before giving up on
    /// the current run.
    pub max_degenerate_retries: usize,
    /// Fixed RNG seed for reproducible runs; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for RansacSettings {
    fn default() -> Self {
        Self {
            max_iterations: 5000,
            confidence: 0.99,
            delta: 1.5,
            max_degenerate_retries: 100,
            seed: None,
        }
    }
}

impl RansacSettings {
    /// Check the invariants the engine relies on.
    ///
    /// Rejecting a confidence of exactly 0 or 1 here keeps the adaptive
    /// iteration formula away from `log(0)` later.
    pub fn validate(&self) -> Result<(), EstimationError> {
        if self.max_iterations == 0 {
            return Err(EstimationError::InvalidSettings(
                "max_iterations must be at least 1",
            ));
        }
        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(EstimationError::InvalidSettings(
                "confidence must lie strictly between 0 and 1",
            ));
        }
        if !(self.delta >= 0.0) {
            return Err(EstimationError::InvalidSettings(
                "delta must be non-negative",
            ));
        }
        if self.max_degenerate_retries == 0 {
            return Err(EstimationError::InvalidSettings(
                "max_degenerate_retries must be at least 1",
            ));
        }
        Ok(())
    }
}
