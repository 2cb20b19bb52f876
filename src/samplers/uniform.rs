//! Uniform random sampler drawing minimal subsets without replacement.

use crate::samplers::Sampler;
use crate::types::DataMatrix;
use crate::utils::UniformRandomGenerator;

/// Uniform random sampler drawing minimal subsets without replacement.
pub struct UniformRandomSampler {
    rng: UniformRandomGenerator<usize>,
}

impl Default for UniformRandomSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl UniformRandomSampler {
    /// Construct a new sampler with a random seed.
    pub fn new() -> Self {
        Self {
            rng: UniformRandomGenerator::new(),
        }
    }

    /// Construct a sampler from a fixed seed for reproducible runs.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: UniformRandomGenerator::from_seed(seed),
        }
    }
}

impl Sampler for UniformRandomSampler {
    fn sample(&mut self, data: &DataMatrix, sample_size: usize, out_indices: &mut [usize]) -> bool {
        let n = data.nrows();
        if sample_size == 0 || sample_size > n || out_indices.len() < sample_size {
            return false;
        }

        self.rng
            .gen_unique(&mut out_indices[..sample_size], 0, n - 1);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_distinct_indices_in_range() {
        let data = DataMatrix::zeros(10, 6);
        let mut sampler = UniformRandomSampler::from_seed(7);
        let mut indices = [0usize; 4];

        assert!(sampler.sample(&data, 4, &mut indices));
        assert!(indices.iter().all(|&i| i < 10));
        for i in 0..indices.len() {
            for j in (i + 1)..indices.len() {
                assert_ne!(indices[i], indices[j]);
            }
        }
    }

    #[test]
    fn refuses_oversized_samples() {
        let data = DataMatrix::zeros(3, 6);
        let mut sampler = UniformRandomSampler::from_seed(7);
        let mut indices = [0usize; 4];
        assert!(!sampler.sample(&data, 4, &mut indices));
        assert!(!sampler.sample(&data, 0, &mut indices));
    }

    #[test]
    fn same_seed_same_sequence() {
        let data = DataMatrix::zeros(50, 6);
        let mut a = UniformRandomSampler::from_seed(99);
        let mut b = UniformRandomSampler::from_seed(99);

        let mut ia = [0usize; 5];
        let mut ib = [0usize; 5];
        for _ in 0..10 {
            assert!(a.sample(&data, 5, &mut ia));
            assert!(b.sample(&data, 5, &mut ib));
            assert_eq!(ia, ib);
        }
    }
}
