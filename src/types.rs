//! Core shared types.
//!
//! A dataset is a dense matrix where every row is one sample. For landmark
//! registration a sample is a concatenated pair of corresponding 3D points,
//! so the matrix is N x 6: `[x1, y1, z1, x2, y2, z2]`.

use nalgebra::DMatrix;

use crate::error::EstimationError;

/// Dynamic matrix of `f64` holding one sample per row.
///
/// The engine and the estimators only ever read from it.
pub type DataMatrix = DMatrix<f64>;

/// Zip two N x 3 point matrices into a single N x 6 dataset, row `i` holding
/// the correspondence `points1[i] -> points2[i]`.
pub fn pair_points(
    points1: &DMatrix<f64>,
    points2: &DMatrix<f64>,
) -> Result<DataMatrix, EstimationError> {
    if points1.nrows() != points2.nrows() {
        return Err(EstimationError::MismatchedPointSets(
            "point sets must have the same number of rows",
        ));
    }
    if points1.ncols() != 3 || points2.ncols() != 3 {
        return Err(EstimationError::MismatchedPointSets(
            "point sets must be Nx3 matrices",
        ));
    }

    let n = points1.nrows();
    let mut data = DataMatrix::zeros(n, 6);
    for i in 0..n {
        for c in 0..3 {
            data[(i, c)] = points1[(i, c)];
            data[(i, c + 3)] = points2[(i, c)];
        }
    }
    Ok(data)
}
