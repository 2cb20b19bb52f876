//! Concrete parameter estimators.

mod landmark;

pub use landmark::LandmarkRegistrationEstimator;
