//! Consensus scoring.
//!
//! A candidate model is scored by scanning the full dataset and counting the
//! samples whose residual stays within the inlier threshold.

use rayon::prelude::*;

use crate::core::ParameterEstimator;
use crate::types::DataMatrix;

/// Datasets at least this large are scanned in parallel. The parallel scan
/// collects indices in enumeration order, so both paths return identical
/// results.
pub const PARALLEL_MIN_ROWS: usize = 4096;

/// Consensus score of a candidate model: the size of its inlier set.
///
/// Ordering is by inlier count; the engine keeps the first candidate that
/// reaches the maximum, which keeps ties deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Score {
    pub inlier_count: usize,
}

impl Score {
    pub fn new(inlier_count: usize) -> Self {
        Self { inlier_count }
    }
}

/// Inlier-count scoring against a fixed residual threshold.
pub struct InlierCountScoring {
    delta: f64,
}

impl InlierCountScoring {
    pub fn new(delta: f64) -> Self {
        Self { delta }
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Scan the full dataset, collecting inlier row indices into
    /// `inliers_out` (in row order) and returning the score.
    pub fn score<E>(
        &self,
        data: &DataMatrix,
        estimator: &E,
        params: &E::Params,
        inliers_out: &mut Vec<usize>,
    ) -> Score
    where
        E: ParameterEstimator + Sync,
        E::Params: Sync,
    {
        let n = data.nrows();
        inliers_out.clear();

        if n >= PARALLEL_MIN_ROWS {
            let found: Vec<usize> = (0..n)
                .into_par_iter()
                .filter(|&row| estimator.residual(params, data, row) <= self.delta)
                .collect();
            inliers_out.extend_from_slice(&found);
        } else {
            for row in 0..n {
                if estimator.residual(params, data, row) <= self.delta {
                    inliers_out.push(row);
                }
            }
        }

        Score::new(inliers_out.len())
    }
}
