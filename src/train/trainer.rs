use std::time::Instant;

use log::info;

use crate::error::Result;
use crate::loss::mse::MseLoss;
use crate::network::network::Network;
use crate::network::training_data::TrainingData;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

/// One in-order pass of online backpropagation over `samples`.
///
/// Returns the mean squared output error, each sample measured just before
/// its own update. An empty slice trains nothing and reports `0.0`.
pub fn train_network(network: &mut Network, samples: &[TrainingData]) -> Result<f64> {
    if samples.is_empty() {
        return Ok(0.0);
    }

    let mut total_loss = 0.0;
    for sample in samples {
        let error = network.back_propagate(sample)?;
        total_loss += MseLoss::from_errors(&error);
    }

    Ok(total_loss / samples.len() as f64)
}

/// Runs `config.epochs` passes of `train_network` and returns the
/// statistics of every epoch, oldest first.
pub fn train_loop(
    network: &mut Network,
    samples: &[TrainingData],
    config: &TrainConfig,
) -> Result<Vec<EpochStats>> {
    let mut history = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();
        let train_loss = train_network(network, samples)?;
        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        if config.log_every > 0 && (epoch % config.log_every == 0 || epoch == config.epochs) {
            info!("epoch {epoch}/{}: loss = {train_loss:.6}", config.epochs);
        }

        history.push(EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss,
            elapsed_ms,
        });
    }

    Ok(history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::params::NetworkInitParameters;
    use rand::{rngs::StdRng, SeedableRng};

    fn network() -> Network {
        Network::new(1, 1, &mut StdRng::seed_from_u64(3)).unwrap()
    }

    #[test]
    fn empty_epoch_reports_zero_loss() {
        assert_eq!(train_network(&mut network(), &[]).unwrap(), 0.0);
    }

    #[test]
    fn loop_records_one_entry_per_epoch() {
        let samples = vec![TrainingData::new(vec![0.2], vec![0.3])];
        let history = train_loop(&mut network(), &samples, &TrainConfig::new(5)).unwrap();
        assert_eq!(history.len(), 5);
        assert_eq!(history[0].epoch, 1);
        assert!(history.iter().all(|s| s.total_epochs == 5));
    }

    #[test]
    fn loss_falls_on_a_single_repeated_sample() {
        let samples = vec![TrainingData::new(vec![0.2], vec![0.3])];
        let history = train_loop(&mut network(), &samples, &TrainConfig::new(20_000)).unwrap();
        assert!(history.last().unwrap().train_loss < history[0].train_loss);
    }

    #[test]
    fn mismatched_sample_stops_training() {
        let params = NetworkInitParameters::new(3, 1, vec![]);
        let mut net = Network::from_params(&params, &mut StdRng::seed_from_u64(3)).unwrap();
        let samples = vec![TrainingData::new(vec![1.0], vec![0.0])];
        assert!(train_network(&mut net, &samples).is_err());
    }
}
