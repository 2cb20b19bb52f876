//! Minimal-subset sampling strategies.

mod uniform;

pub use uniform::UniformRandomSampler;

use crate::types::DataMatrix;

/// Sampler responsible for drawing minimal subsets from the data.
///
/// Randomness lives behind this trait so runs can be made reproducible by
/// injecting a seeded sampler.
pub trait Sampler {
    /// Draw `sample_size` distinct row indices into `out_indices`.
    ///
    /// Returns `false` if a valid sample could not be drawn (caller may
    /// retry or give up).
    fn sample(&mut self, data: &DataMatrix, sample_size: usize, out_indices: &mut [usize]) -> bool;
}
