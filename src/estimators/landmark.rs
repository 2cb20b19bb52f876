//! Landmark registration: rigid 3D transform between paired point sets.
//!
//! The closed-form solve is the classical absolute-orientation solution:
//! center both point sets on their centroids, take the SVD of the
//! cross-covariance, and correct the determinant so the result is a proper
//! rotation. The same solve serves minimal subsets and the over-determined
//! least-squares path.

use nalgebra::{DMatrix, Matrix3, Point3, Vector3, SVD};

use crate::core::ParameterEstimator;
use crate::error::EstimationError;
use crate::models::RigidTransform;
use crate::types::DataMatrix;

/// A rigid transform has six degrees of freedom; three non-collinear
/// correspondences pin it down.
const MIN_CORRESPONDENCES: usize = 3;

/// Relative floor on the second singular value of the cross-covariance.
/// Below it the point configuration is collinear or coincident and the
/// rotation is underdetermined.
const RANK_EPS: f64 = 1e-9;

/// Estimates a rigid 3D transform mapping the first half of each sample
/// (columns 0..3) onto the second half (columns 3..6).
pub struct LandmarkRegistrationEstimator {
    minimal_set_size: usize,
}

impl Default for LandmarkRegistrationEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl LandmarkRegistrationEstimator {
    /// Estimator with the theoretical minimal subset size of three.
    pub fn new() -> Self {
        Self {
            minimal_set_size: MIN_CORRESPONDENCES,
        }
    }

    /// Estimator with a larger minimal subset size. Values below three are
    /// clamped up, since fewer correspondences cannot fix the transform.
    /// Raising this pushes the sampler towards (nearly) all-inlier draws.
    pub fn with_minimal_set_size(minimal_set_size: usize) -> Self {
        Self {
            minimal_set_size: minimal_set_size.max(MIN_CORRESPONDENCES),
        }
    }

    /// Closed-form absolute-orientation solve over the given rows.
    ///
    /// Returns `None` when the configuration is degenerate: fewer than three
    /// rows, all points coincident, or a rank-deficient cross-covariance
    /// (collinear landmarks).
    fn solve(&self, data: &DataMatrix, indices: &[usize]) -> Option<RigidTransform> {
        let n = indices.len();
        if n < MIN_CORRESPONDENCES || data.ncols() < 6 {
            return None;
        }

        // Centroids of both point sets.
        let mut c0 = Vector3::<f64>::zeros();
        let mut c1 = Vector3::<f64>::zeros();
        for &idx in indices {
            for c in 0..3 {
                c0[c] += data[(idx, c)];
                c1[c] += data[(idx, c + 3)];
            }
        }
        c0 /= n as f64;
        c1 /= n as f64;

        // Centered point matrices and average spread.
        let mut p0 = DMatrix::<f64>::zeros(3, n);
        let mut p1 = DMatrix::<f64>::zeros(3, n);
        let mut avg_dist0 = 0.0;
        let mut avg_dist1 = 0.0;

        for (col, &idx) in indices.iter().enumerate() {
            for c in 0..3 {
                p0[(c, col)] = data[(idx, c)] - c0[c];
                p1[(c, col)] = data[(idx, c + 3)] - c1[c];
            }
            avg_dist0 += p0.column(col).norm();
            avg_dist1 += p1.column(col).norm();
        }

        avg_dist0 /= n as f64;
        avg_dist1 /= n as f64;

        if avg_dist0 < 1e-10 || avg_dist1 < 1e-10 {
            return None;
        }

        // Normalize for numerical stability.
        let s0 = 3.0_f64.sqrt() / avg_dist0;
        let s1 = 3.0_f64.sqrt() / avg_dist1;
        p0 *= s0;
        p1 *= s1;

        // Cross-covariance H = P0 * P1^T.
        let h = &p0 * &p1.transpose();
        if h.iter().any(|&x| !x.is_finite()) {
            return None;
        }

        // SVD: H = U * S * V^T, then R = V * U^T.
        let svd = SVD::new(h, true, true);
        let u = svd.u?;
        let vt = svd.v_t?;
        let v = vt.transpose();

        // Collinear or coincident landmarks leave the rotation
        // underdetermined.
        let sv = &svd.singular_values;
        if sv[1] < RANK_EPS * sv[0].max(1.0) {
            return None;
        }

        let mut r = &v * &u.transpose();
        if r.determinant() < 0.0 {
            let mut v_neg = v.clone();
            v_neg.column_mut(2).neg_mut();
            r = &v_neg * &u.transpose();
        }

        let r_fixed = Matrix3::<f64>::from_iterator(r.iter().cloned());
        let t = c1 - r_fixed * c0;

        Some(RigidTransform::from_rt(r_fixed, t))
    }
}

impl ParameterEstimator for LandmarkRegistrationEstimator {
    type Params = RigidTransform;

    fn minimal_set_size(&self) -> usize {
        self.minimal_set_size
    }

    fn estimate(&self, data: &DataMatrix, sample: &[usize]) -> Option<Self::Params> {
        if sample.len() < self.minimal_set_size {
            return None;
        }
        self.solve(data, sample)
    }

    fn residual(&self, params: &Self::Params, data: &DataMatrix, row: usize) -> f64 {
        let p1 = Point3::new(data[(row, 0)], data[(row, 1)], data[(row, 2)]);
        let p2 = Vector3::new(data[(row, 3)], data[(row, 4)], data[(row, 5)]);
        (params.apply(&p1).coords - p2).norm()
    }

    fn least_squares(
        &self,
        data: &DataMatrix,
        indices: &[usize],
    ) -> Result<Self::Params, EstimationError> {
        if indices.len() < MIN_CORRESPONDENCES {
            return Err(EstimationError::InsufficientData {
                required: MIN_CORRESPONDENCES,
                actual: indices.len(),
            });
        }
        self.solve(data, indices)
            .ok_or(EstimationError::DegenerateData)
    }
}
