//! The parameter-estimator capability and the RANSAC engine.
//!
//! The engine is generic over two seams: [`ParameterEstimator`], which turns
//! minimal subsets into candidate parameters and measures per-sample
//! residuals, and [`Sampler`](crate::samplers::Sampler), which supplies the
//! randomness. Any registration problem that implements the estimator trait
//! plugs into the same engine unmodified.

use log::{debug, warn};

use crate::error::EstimationError;
use crate::samplers::{Sampler, UniformRandomSampler};
use crate::scoring::InlierCountScoring;
use crate::settings::RansacSettings;
use crate::types::DataMatrix;

/// Estimator responsible for generating candidate parameters from minimal
/// subsets and scoring individual samples against them.
pub trait ParameterEstimator {
    /// Candidate parameter vector produced by this estimator. Its
    /// dimensionality is fixed per problem instance.
    type Params: Clone;

    /// Size of a minimal subset sufficient to produce one candidate.
    /// Must be at least 1 and no larger than the dataset.
    fn minimal_set_size(&self) -> usize;

    /// Estimate candidate parameters from the rows named by `sample`.
    ///
    /// Accepts exactly `minimal_set_size()` rows or more (over-determined
    /// direct solve). Returns `None` if the subset is undersized or
    /// numerically degenerate; never mutates the data.
    fn estimate(&self, data: &DataMatrix, sample: &[usize]) -> Option<Self::Params>;

    /// Non-negative scalar measuring how inconsistent one sample is with the
    /// candidate parameters. Exactly zero for a perfectly consistent sample.
    fn residual(&self, params: &Self::Params, data: &DataMatrix, row: usize) -> f64;

    /// Closed-form fit over all rows named by `indices` simultaneously, with
    /// no outlier rejection. Fails explicitly on undersized or degenerate
    /// input instead of returning garbage.
    fn least_squares(
        &self,
        data: &DataMatrix,
        indices: &[usize],
    ) -> Result<Self::Params, EstimationError>;
}

/// Result of a successful RANSAC run.
#[derive(Debug, Clone)]
pub struct ConsensusResult<P> {
    /// Final parameters: the least-squares refit over the winning inlier
    /// set, or the raw consensus winner if the refit was degenerate.
    pub params: P,
    /// Row indices of the winning inlier set, in dataset order.
    pub inliers: Vec<usize>,
    /// `inliers.len() / N * 100`, in `[0, 100]`.
    pub percentage_used: f64,
    /// Number of candidates actually scored.
    pub iterations: usize,
}

/// RANSAC engine: repeatedly samples minimal subsets, scores consensus over
/// the full dataset, and converges to the parameters supported by the
/// largest inlier set.
///
/// All best-so-far state is owned by the run, so concurrent engines are
/// fully independent.
pub struct Ransac<E, S = UniformRandomSampler>
where
    E: ParameterEstimator,
    S: Sampler,
{
    settings: RansacSettings,
    estimator: E,
    sampler: S,
}

impl<E> Ransac<E>
where
    E: ParameterEstimator,
{
    /// Create an engine with a uniform sampler, seeded from the settings.
    pub fn new(settings: RansacSettings, estimator: E) -> Self {
        let sampler = match settings.seed {
            Some(seed) => UniformRandomSampler::from_seed(seed),
            None => UniformRandomSampler::new(),
        };
        Self::with_sampler(settings, estimator, sampler)
    }
}

impl<E, S> Ransac<E, S>
where
    E: ParameterEstimator,
    S: Sampler,
{
    /// Create an engine with a caller-supplied sampler.
    pub fn with_sampler(settings: RansacSettings, estimator: E, sampler: S) -> Self {
        Self {
            settings,
            estimator,
            sampler,
        }
    }

    pub fn settings(&self) -> &RansacSettings {
        &self.settings
    }
}

impl<E, S> Ransac<E, S>
where
    E: ParameterEstimator + Sync,
    E::Params: Sync,
    S: Sampler,
{
    /// Run the adaptive consensus loop.
    ///
    /// Terminates when the adaptively shrinking iteration bound is reached,
    /// when a candidate explains the whole dataset, or at the hard cap in
    /// the settings, whichever comes first. On success the winning candidate
    /// is refined with a least-squares fit over its inlier set.
    pub fn compute(
        &mut self,
        data: &DataMatrix,
    ) -> Result<ConsensusResult<E::Params>, EstimationError> {
        self.settings.validate()?;

        let n = data.nrows();
        let m = self.estimator.minimal_set_size();
        if m == 0 {
            return Err(EstimationError::InvalidSettings(
                "estimator minimal set size must be at least 1",
            ));
        }
        if n < m {
            return Err(EstimationError::InsufficientData {
                required: m,
                actual: n,
            });
        }

        let scoring = InlierCountScoring::new(self.settings.delta);
        let mut sample = vec![0usize; m];
        let mut inliers: Vec<usize> = Vec::with_capacity(n);

        let mut best_params: Option<E::Params> = None;
        let mut best_inliers: Vec<usize> = Vec::new();
        let mut had_candidate = false;

        let mut required = self.settings.max_iterations;
        let mut iteration = 0usize;
        let mut consecutive_failures = 0usize;

        while iteration < required {
            // Draw until we get a non-degenerate candidate, bounded so a
            // pathological dataset cannot spin forever.
            let candidate = loop {
                let drawn = self.sampler.sample(data, m, &mut sample);
                if drawn {
                    if let Some(params) = self.estimator.estimate(data, &sample) {
                        consecutive_failures = 0;
                        break Some(params);
                    }
                }
                consecutive_failures += 1;
                if consecutive_failures >= self.settings.max_degenerate_retries {
                    break None;
                }
            };

            let Some(params) = candidate else {
                warn!(
                    "abandoning search after {} consecutive degenerate draws",
                    consecutive_failures
                );
                break;
            };
            had_candidate = true;

            let score = scoring.score(data, &self.estimator, &params, &mut inliers);

            // First candidate to reach a given count wins; ties stay with
            // the earlier candidate so runs are reproducible.
            if score.inlier_count > best_inliers.len() {
                best_params = Some(params);
                best_inliers.clear();
                best_inliers.extend_from_slice(&inliers);
            }

            iteration += 1;

            let inlier_ratio = best_inliers.len() as f64 / n as f64;
            if inlier_ratio >= 1.0 {
                debug!("all {} samples explained after {} iterations", n, iteration);
                break;
            }
            if let Some(k) = required_iterations(self.settings.confidence, inlier_ratio, m) {
                if k < required {
                    debug!(
                        "iteration bound tightened to {} (inlier ratio {:.3})",
                        k, inlier_ratio
                    );
                    required = k;
                }
            }
        }

        if best_inliers.len() >= m {
            let raw = best_params.expect("non-empty inlier set implies a candidate");
            // Consensus-then-refine: refit over the winning inlier set. If
            // the refit is itself degenerate, the raw winner stands.
            let params = match self.estimator.least_squares(data, &best_inliers) {
                Ok(refined) => refined,
                Err(err) => {
                    warn!("least-squares refinement failed ({err}), keeping raw candidate");
                    raw
                }
            };
            let percentage_used = best_inliers.len() as f64 / n as f64 * 100.0;
            debug!(
                "consensus: {}/{} inliers in {} iterations",
                best_inliers.len(),
                n,
                iteration
            );
            return Ok(ConsensusResult {
                params,
                inliers: best_inliers,
                percentage_used,
                iterations: iteration,
            });
        }

        if had_candidate {
            Err(EstimationError::NoConsensus { iterations: iteration })
        } else {
            Err(EstimationError::DegenerateData)
        }
    }
}

/// Adaptive iteration bound: number of draws needed so that the probability
/// of having seen at least one outlier-free minimal subset reaches
/// `confidence`, given the current best inlier ratio.
///
/// Returns `None` when the formula is undefined: a zero ratio means "not yet
/// converged, keep the current bound" and a ratio of one is handled by the
/// caller as immediate termination.
fn required_iterations(confidence: f64, inlier_ratio: f64, sample_size: usize) -> Option<usize> {
    if !(inlier_ratio > 0.0 && inlier_ratio < 1.0) {
        return None;
    }

    let p_good_sample = inlier_ratio.powi(sample_size as i32);
    if p_good_sample <= 0.0 || p_good_sample >= 1.0 {
        return None;
    }

    let log_one_minus_conf = (1.0 - confidence).ln();
    let log_one_minus_p = (1.0 - p_good_sample).ln();
    if !log_one_minus_conf.is_finite() || log_one_minus_p >= 0.0 {
        return None;
    }

    Some((log_one_minus_conf / log_one_minus_p).ceil().max(1.0) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Toy 1D estimator over a single-column dataset: the model is a scalar
    /// location, fitted as the mean of the sampled values.
    struct MeanEstimator;

    impl ParameterEstimator for MeanEstimator {
        type Params = f64;

        fn minimal_set_size(&self) -> usize {
            2
        }

        fn estimate(&self, data: &DataMatrix, sample: &[usize]) -> Option<Self::Params> {
            if sample.len() < self.minimal_set_size() {
                return None;
            }
            let sum: f64 = sample.iter().map(|&i| data[(i, 0)]).sum();
            Some(sum / sample.len() as f64)
        }

        fn residual(&self, params: &Self::Params, data: &DataMatrix, row: usize) -> f64 {
            (data[(row, 0)] - params).abs()
        }

        fn least_squares(
            &self,
            data: &DataMatrix,
            indices: &[usize],
        ) -> Result<Self::Params, EstimationError> {
            if indices.len() < self.minimal_set_size() {
                return Err(EstimationError::InsufficientData {
                    required: self.minimal_set_size(),
                    actual: indices.len(),
                });
            }
            let sum: f64 = indices.iter().map(|&i| data[(i, 0)]).sum();
            Ok(sum / indices.len() as f64)
        }
    }

    /// Estimator whose subsets are always degenerate.
    struct AlwaysDegenerate;

    impl ParameterEstimator for AlwaysDegenerate {
        type Params = f64;

        fn minimal_set_size(&self) -> usize {
            2
        }

        fn estimate(&self, _data: &DataMatrix, _sample: &[usize]) -> Option<Self::Params> {
            None
        }

        fn residual(&self, _params: &Self::Params, _data: &DataMatrix, _row: usize) -> f64 {
            0.0
        }

        fn least_squares(
            &self,
            _data: &DataMatrix,
            _indices: &[usize],
        ) -> Result<Self::Params, EstimationError> {
            Err(EstimationError::DegenerateData)
        }
    }

    /// Estimator producing candidates that never explain any sample.
    struct NeverFits;

    impl ParameterEstimator for NeverFits {
        type Params = f64;

        fn minimal_set_size(&self) -> usize {
            2
        }

        fn estimate(&self, _data: &DataMatrix, _sample: &[usize]) -> Option<Self::Params> {
            Some(0.0)
        }

        fn residual(&self, _params: &Self::Params, _data: &DataMatrix, _row: usize) -> f64 {
            10.0
        }

        fn least_squares(
            &self,
            _data: &DataMatrix,
            _indices: &[usize],
        ) -> Result<Self::Params, EstimationError> {
            Ok(0.0)
        }
    }

    fn clustered_data() -> DataMatrix {
        // Eight values near zero, two gross outliers.
        let mut data = DataMatrix::zeros(10, 1);
        for (row, v) in [0.00, 0.02, 0.05, 0.08, 0.11, 0.14, 0.17, 0.20]
            .iter()
            .enumerate()
        {
            data[(row, 0)] = *v;
        }
        data[(8, 0)] = 100.0;
        data[(9, 0)] = 103.0;
        data
    }

    fn seeded_settings() -> RansacSettings {
        RansacSettings {
            delta: 0.5,
            seed: Some(42),
            ..Default::default()
        }
    }

    #[test]
    fn rejects_datasets_smaller_than_minimal_set() {
        let data = DataMatrix::zeros(1, 1);
        let mut engine = Ransac::new(seeded_settings(), MeanEstimator);
        assert!(matches!(
            engine.compute(&data),
            Err(EstimationError::InsufficientData {
                required: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn finds_the_inlier_cluster() {
        let data = clustered_data();
        let mut engine = Ransac::new(seeded_settings(), MeanEstimator);

        let result = engine.compute(&data).unwrap();
        assert_eq!(result.inliers, vec![0, 1, 2, 3, 4, 5, 6, 7]);
        assert!((result.percentage_used - 80.0).abs() < 1e-12);
        // Refined estimate is the mean of the eight inliers.
        assert!((result.params - 0.09625).abs() < 1e-12);
    }

    #[test]
    fn identical_seeds_give_identical_runs() {
        let data = clustered_data();

        let mut a = Ransac::new(seeded_settings(), MeanEstimator);
        let mut b = Ransac::new(seeded_settings(), MeanEstimator);

        let ra = a.compute(&data).unwrap();
        let rb = b.compute(&data).unwrap();

        assert_eq!(ra.params.to_bits(), rb.params.to_bits());
        assert_eq!(ra.inliers, rb.inliers);
        assert_eq!(ra.iterations, rb.iterations);
    }

    #[test]
    fn degenerate_configuration_is_reported() {
        let data = clustered_data();
        let settings = RansacSettings {
            max_degenerate_retries: 10,
            ..seeded_settings()
        };
        let mut engine = Ransac::new(settings, AlwaysDegenerate);
        assert!(matches!(
            engine.compute(&data),
            Err(EstimationError::DegenerateData)
        ));
    }

    #[test]
    fn exhausted_budget_without_consensus_is_reported() {
        let data = clustered_data();
        let settings = RansacSettings {
            max_iterations: 50,
            ..seeded_settings()
        };
        let mut engine = Ransac::new(settings, NeverFits);
        assert!(matches!(
            engine.compute(&data),
            Err(EstimationError::NoConsensus { iterations: 50 })
        ));
    }

    #[test]
    fn perfect_data_terminates_immediately() {
        // Every sample sits on the model: the first candidate explains all
        // of them and the loop stops without exhausting the budget.
        let mut data = DataMatrix::zeros(20, 1);
        for row in 0..20 {
            data[(row, 0)] = 5.0 + (row as f64) * 1e-3;
        }
        let mut engine = Ransac::new(seeded_settings(), MeanEstimator);

        let result = engine.compute(&data).unwrap();
        assert_eq!(result.inliers.len(), 20);
        assert!((result.percentage_used - 100.0).abs() < 1e-12);
        assert_eq!(result.iterations, 1);
    }

    #[test]
    fn extreme_confidence_values_still_terminate() {
        let data = clustered_data();

        for confidence in [1e-12, 1.0 - 1e-12] {
            let settings = RansacSettings {
                confidence,
                max_iterations: 200,
                ..seeded_settings()
            };
            let mut engine = Ransac::new(settings, MeanEstimator);
            let result = engine.compute(&data).unwrap();
            assert!(result.iterations <= 200);
            assert!(!result.inliers.is_empty());
        }
    }

    #[test]
    fn required_iterations_guards_the_probability_formula() {
        // Undefined ratios defer to the caller.
        assert_eq!(required_iterations(0.99, 0.0, 3), None);
        assert_eq!(required_iterations(0.99, 1.0, 3), None);

        // Half inliers, minimal set of 2: k = ln(0.01) / ln(0.75) ~ 17.
        assert_eq!(required_iterations(0.99, 0.5, 2), Some(17));

        // Higher inlier ratios need fewer draws.
        let low = required_iterations(0.99, 0.9, 3).unwrap();
        let high = required_iterations(0.99, 0.3, 3).unwrap();
        assert!(low < high);

        // Never returns zero, even for tiny confidence.
        assert_eq!(required_iterations(1e-15, 0.5, 2), Some(1));
    }
}
