//! Example: robust landmark registration.
//!
//! Builds a synthetic pair of corresponding 3D point sets related by a known
//! rigid transform, corrupts a fraction of the correspondences, then compares
//! the direct least-squares fit (thrown off by the mismatches) against the
//! RANSAC estimate (which excludes them).

use consensus::{
    estimate_landmark_transform, least_squares_landmark_transform, RansacSettings,
};
use nalgebra::{DMatrix, Point3, Translation3, UnitQuaternion, Vector3};
use rand::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let n_inliers = 80;
    let n_outliers = 20;
    let n_total = n_inliers + n_outliers;

    let mut rng = StdRng::seed_from_u64(12345);

    // Ground truth: rotate 25 degrees about z, then translate.
    let rotation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 25f64.to_radians());
    let translation = Translation3::new(10.0, -4.0, 2.5);

    println!("=== Landmark Registration Example ===\n");
    println!(
        "Ground truth: rotation 25 deg about z, translation ({}, {}, {})",
        translation.vector.x, translation.vector.y, translation.vector.z
    );
    println!("{n_inliers} true correspondences, {n_outliers} mismatches\n");

    let mut points1 = DMatrix::<f64>::zeros(n_total, 3);
    let mut points2 = DMatrix::<f64>::zeros(n_total, 3);

    for i in 0..n_total {
        let p = Point3::new(
            rng.gen_range(-20.0..20.0),
            rng.gen_range(-20.0..20.0),
            rng.gen_range(-20.0..20.0),
        );
        let q = rotation.transform_point(&p) + translation.vector;

        points1[(i, 0)] = p.x;
        points1[(i, 1)] = p.y;
        points1[(i, 2)] = p.z;

        if i < n_inliers {
            points2[(i, 0)] = q.x;
            points2[(i, 1)] = q.y;
            points2[(i, 2)] = q.z;
        } else {
            // A mismatched correspondence: the second point is unrelated.
            points2[(i, 0)] = q.x + rng.gen_range(50.0..200.0);
            points2[(i, 1)] = q.y - rng.gen_range(50.0..200.0);
            points2[(i, 2)] = q.z + rng.gen_range(-200.0..200.0);
        }
    }

    // Baseline: direct least squares over everything, outliers included.
    let baseline = least_squares_landmark_transform(&points1, &points2)?;
    println!("Least-squares fit over all data (contaminated):");
    println!("  parameters: {:.4?}\n", baseline.parameters());

    // Robust path.
    let settings = RansacSettings {
        seed: Some(98765),
        ..Default::default()
    };
    let result = estimate_landmark_transform(&points1, &points2, 0.5, Some(settings))?;

    println!(
        "RANSAC fit: {} inliers ({:.1}% of data) in {} iterations",
        result.inliers.len(),
        result.percentage_used,
        result.iterations
    );
    println!("  parameters: {:.4?}", result.model.parameters());

    let recovered_translation = result.model.translation.vector;
    println!(
        "  recovered translation: ({:.4}, {:.4}, {:.4})",
        recovered_translation.x, recovered_translation.y, recovered_translation.z
    );

    Ok(())
}
