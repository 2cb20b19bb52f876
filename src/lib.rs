//! # consensus — robust landmark registration with RANSAC
//!
//! `consensus` recovers a rigid 3D transform between two corresponding point
//! sets that may contain mismatched (outlier) correspondences. A generic
//! RANSAC engine drives a pluggable parameter estimator; the bundled
//! [`LandmarkRegistrationEstimator`] solves the classical closed-form
//! point-set alignment.
//!
//! ## Quick start
//!
//! ```rust
//! use consensus::{estimate_landmark_transform, RansacSettings};
//! use nalgebra::DMatrix;
//!
//! // Four matched points, the second set shifted by (1, 2, 3).
//! let points1 = DMatrix::from_row_slice(4, 3, &[
//!     0.0, 0.0, 0.0,
//!     1.0, 0.0, 0.0,
//!     0.0, 1.0, 0.0,
//!     0.0, 0.0, 1.0,
//! ]);
//! let mut points2 = points1.clone();
//! for i in 0..4 {
//!     points2[(i, 0)] += 1.0;
//!     points2[(i, 1)] += 2.0;
//!     points2[(i, 2)] += 3.0;
//! }
//!
//! let settings = RansacSettings { seed: Some(1), ..Default::default() };
//! let result = estimate_landmark_transform(&points1, &points2, 0.1, Some(settings)).unwrap();
//!
//! assert_eq!(result.inliers.len(), 4);
//! assert!((result.percentage_used - 100.0).abs() < 1e-9);
//! ```
//!
//! ## Extending
//!
//! New registration problems (similarity, affine, homography, ...) implement
//! [`ParameterEstimator`](core::ParameterEstimator) and plug into the same
//! [`Ransac`](core::Ransac) engine unmodified:
//!
//! - `minimal_set_size` — smallest subset that fixes the parameters
//! - `estimate` — candidate parameters from a subset, `None` if degenerate
//! - `residual` — non-negative per-sample consistency measure
//! - `least_squares` — closed-form fit over an arbitrary index set
//!
//! Randomness is injected through the [`Sampler`](samplers::Sampler) trait,
//! so seeded runs are fully reproducible.
//!
//! ## Modules
//!
//! - **[`api`]**: high-level entry points for landmark registration
//! - **[`core`]**: the `ParameterEstimator` capability and the `Ransac` engine
//! - **[`estimators`]**: built-in estimators
//! - **[`samplers`]**: minimal-subset sampling strategies
//! - **[`scoring`]**: consensus scoring
//! - **[`models`]**: geometric model types
//! - **[`settings`]**: engine configuration
//! - **[`error`]**: the failure taxonomy

pub mod api;
pub mod core;
pub mod error;
pub mod estimators;
pub mod models;
pub mod samplers;
pub mod scoring;
pub mod settings;
pub mod types;
pub mod utils;

pub use api::{
    estimate_landmark_transform, least_squares_landmark_transform, EstimationResult,
};
pub use crate::core::{ConsensusResult, ParameterEstimator, Ransac};
pub use error::EstimationError;
pub use estimators::LandmarkRegistrationEstimator;
pub use models::RigidTransform;
pub use samplers::{Sampler, UniformRandomSampler};
pub use scoring::{InlierCountScoring, Score};
pub use settings::RansacSettings;
pub use types::{pair_points, DataMatrix};
