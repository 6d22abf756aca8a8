use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;

use crate::error::{NetworkError, Result};
use crate::loss::{mae::MaeLoss, mse::MseLoss};
use crate::network::network::Network;
use crate::network::params::NetworkInitParameters;
use crate::network::training_data::TrainingData;

/// Leave-one-out evaluation of a network blueprint over a sample set.
///
/// Each fold builds a brand-new network from `init_parameters`, trains it on
/// every sample but one (in order, `epochs` passes), and records
/// `prediction[0] - target[0]` for the held-out sample. Folds share nothing,
/// so `validate_parallel` can run them on the rayon pool.
#[derive(Debug, Clone)]
pub struct CrossValidator {
    pub init_parameters: NetworkInitParameters,
    samples: Vec<TrainingData>,
    epochs: usize,
}

impl CrossValidator {
    /// Checks the blueprint and that every sample fits it.
    pub fn new(init_parameters: NetworkInitParameters, samples: Vec<TrainingData>) -> Result<Self> {
        init_parameters.validate()?;
        for (i, sample) in samples.iter().enumerate() {
            if sample.vector_in.len() != init_parameters.input_size
                || sample.vector_out.len() != init_parameters.output_size
            {
                return Err(NetworkError::config(format!(
                    "sample {i} is {}->{}, network is {}->{}",
                    sample.vector_in.len(),
                    sample.vector_out.len(),
                    init_parameters.input_size,
                    init_parameters.output_size
                )));
            }
        }

        Ok(CrossValidator { init_parameters, samples, epochs: 1 })
    }

    /// Passes over the training subset per fold. Defaults to a single pass.
    pub fn with_epochs(mut self, epochs: usize) -> Result<Self> {
        if epochs == 0 {
            return Err(NetworkError::config("cross-validation needs at least one epoch"));
        }
        self.epochs = epochs;
        Ok(self)
    }

    pub fn samples(&self) -> &[TrainingData] {
        &self.samples
    }

    pub fn epochs(&self) -> usize {
        self.epochs
    }

    /// One error per sample, in sample order, every fold drawing its weights
    /// from `rng` in turn.
    pub fn validate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<f64>> {
        info!("leave-one-out over {} samples, {} epoch(s) per fold", self.samples.len(), self.epochs);
        let errors = (0..self.samples.len())
            .map(|skip| self.run_fold(skip, &mut *rng))
            .collect::<Result<Vec<f64>>>()?;
        self.log_summary(&errors);
        Ok(errors)
    }

    /// Like `validate`, but fold `skip` seeds its own generator with
    /// `seed + skip`, so the result does not depend on fold order.
    pub fn validate_seeded(&self, seed: u64) -> Result<Vec<f64>> {
        info!("leave-one-out over {} samples, seed {seed}", self.samples.len());
        let errors = (0..self.samples.len())
            .map(|skip| self.run_fold(skip, &mut fold_rng(seed, skip)))
            .collect::<Result<Vec<f64>>>()?;
        self.log_summary(&errors);
        Ok(errors)
    }

    /// `validate_seeded` with folds spread over the rayon thread pool.
    /// Returns exactly what `validate_seeded` returns for the same seed.
    pub fn validate_parallel(&self, seed: u64) -> Result<Vec<f64>> {
        info!("parallel leave-one-out over {} samples, seed {seed}", self.samples.len());
        let errors = (0..self.samples.len())
            .into_par_iter()
            .map(|skip| self.run_fold(skip, &mut fold_rng(seed, skip)))
            .collect::<Result<Vec<f64>>>()?;
        self.log_summary(&errors);
        Ok(errors)
    }

    fn run_fold<R: Rng + ?Sized>(&self, skip: usize, rng: &mut R) -> Result<f64> {
        let mut network = Network::from_params(&self.init_parameters, rng)?;

        for _ in 0..self.epochs {
            for (i, sample) in self.samples.iter().enumerate() {
                if i == skip {
                    continue;
                }
                network.back_propagate(sample)?;
            }
        }

        let held_out = &self.samples[skip];
        let prediction = network.predict(&held_out.vector_in)?;
        let error = prediction[0] - held_out.vector_out[0];
        debug!("fold {skip}: prediction {:.6}, error {error:.6}", prediction[0]);
        Ok(error)
    }

    fn log_summary(&self, errors: &[f64]) {
        if !errors.is_empty() {
            let summary = ValidationSummary::from_errors(errors);
            info!("leave-one-out finished: mse {:.6}, mae {:.6}", summary.mse, summary.mae);
        }
    }
}

fn fold_rng(seed: u64, skip: usize) -> StdRng {
    StdRng::seed_from_u64(seed.wrapping_add(skip as u64))
}

/// Aggregate view of per-fold errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationSummary {
    pub folds: usize,
    pub mse: f64,
    pub mae: f64,
    /// Largest absolute fold error.
    pub max_abs: f64,
}

impl ValidationSummary {
    pub fn from_errors(errors: &[f64]) -> Self {
        if errors.is_empty() {
            return ValidationSummary { folds: 0, mse: 0.0, mae: 0.0, max_abs: 0.0 };
        }
        ValidationSummary {
            folds: errors.len(),
            mse: MseLoss::from_errors(errors),
            mae: MaeLoss::from_errors(errors),
            max_abs: errors.iter().fold(0.0, |acc: f64, e| acc.max(e.abs())),
        }
    }
}
