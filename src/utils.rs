//! Small shared utilities.
//!
//! The uniform random generator wraps `rand` behind a seedable interface so
//! the sampling strategy stays reproducible under test.

use rand::distributions::Uniform;
use rand::prelude::*;

/// Uniform integer random-number generator.
///
/// By default this uses a randomly seeded RNG, but callers can construct it
/// from a fixed seed for reproducible runs.
pub struct UniformRandomGenerator<T>
where
    T: Copy + rand::distributions::uniform::SampleUniform + PartialOrd,
{
    rng: StdRng,
    dist: Option<Uniform<T>>,
}

impl<T> UniformRandomGenerator<T>
where
    T: Copy + rand::distributions::uniform::SampleUniform + PartialOrd,
{
    /// Construct with a random seed.
    pub fn new() -> Self {
        let rng = StdRng::from_rng(thread_rng()).expect("failed to seed StdRng");
        Self { rng, dist: None }
    }

    /// Construct with a fixed seed.
    pub fn from_seed(seed: u64) -> Self {
        let rng = StdRng::seed_from_u64(seed);
        Self { rng, dist: None }
    }

    /// Reset the distribution range to `[min, max]` inclusive.
    pub fn reset(&mut self, min: T, max: T) {
        self.dist = Some(Uniform::new_inclusive(min, max));
    }

    /// Draw a single random value using the current distribution.
    pub fn next(&mut self) -> T {
        let dist = self
            .dist
            .as_ref()
            .expect("UniformRandomGenerator: distribution not initialized");
        self.rng.sample(dist)
    }

    /// Generate a set of unique random integers in `[min, max]` into `out`.
    ///
    /// Rejection sampling is fine here: minimal sample sizes are tiny
    /// compared to the dataset.
    pub fn gen_unique(&mut self, out: &mut [T], min: T, max: T)
    where
        T: Eq,
    {
        self.reset(min, max);
        let n = out.len();
        for i in 0..n {
            loop {
                let candidate = self.next();
                if out[..i].iter().all(|&v| v != candidate) {
                    out[i] = candidate;
                    break;
                }
            }
        }
    }
}

impl<T> Default for UniformRandomGenerator<T>
where
    T: Copy + rand::distributions::uniform::SampleUniform + PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}
