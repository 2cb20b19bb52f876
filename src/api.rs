//! High-level entry points for landmark registration.
//!
//! These wrap the generic engine for the common case: two N x 3 point
//! matrices with row-wise correspondence, possibly containing mismatches.

use nalgebra::DMatrix;

use crate::core::{ParameterEstimator, Ransac};
use crate::error::EstimationError;
use crate::estimators::LandmarkRegistrationEstimator;
use crate::models::RigidTransform;
use crate::settings::RansacSettings;
use crate::types::pair_points;

/// Result of a robust estimation run.
#[derive(Debug, Clone)]
pub struct EstimationResult<M> {
    /// The estimated model, refined over the winning inlier set.
    pub model: M,
    /// Indices of inlier correspondences, in dataset order.
    pub inliers: Vec<usize>,
    /// Percentage of the data explained by the model, in `[0, 100]`.
    pub percentage_used: f64,
    /// Number of candidate models scored.
    pub iterations: usize,
}

/// Robustly estimate the rigid transform mapping `points1` onto `points2`.
///
/// `delta` is the inlier threshold: the maximum Euclidean distance between a
/// transformed point and its match for the correspondence to count as
/// consistent. It overrides `settings.delta`.
///
/// # Arguments
/// * `points1` - First point set (Nx3 matrix)
/// * `points2` - Second point set (Nx3 matrix), row-wise matched to `points1`
/// * `delta` - Inlier threshold in point-space units
/// * `settings` - Optional RANSAC settings (uses defaults if None)
pub fn estimate_landmark_transform(
    points1: &DMatrix<f64>,
    points2: &DMatrix<f64>,
    delta: f64,
    settings: Option<RansacSettings>,
) -> Result<EstimationResult<RigidTransform>, EstimationError> {
    let data = pair_points(points1, points2)?;

    let mut settings = settings.unwrap_or_default();
    settings.delta = delta;

    let mut ransac = Ransac::new(settings, LandmarkRegistrationEstimator::new());
    let result = ransac.compute(&data)?;

    Ok(EstimationResult {
        model: result.params,
        inliers: result.inliers,
        percentage_used: result.percentage_used,
        iterations: result.iterations,
    })
}

/// Direct least-squares fit over *all* correspondences, with no outlier
/// rejection. Useful as a baseline, or when the pairing is known to be
/// clean.
pub fn least_squares_landmark_transform(
    points1: &DMatrix<f64>,
    points2: &DMatrix<f64>,
) -> Result<RigidTransform, EstimationError> {
    let data = pair_points(points1, points2)?;
    let indices: Vec<usize> = (0..data.nrows()).collect();
    LandmarkRegistrationEstimator::new().least_squares(&data, &indices)
}
