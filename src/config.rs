use serde::{Serialize, Deserialize};

use crate::data::haberman::TargetEncoding;
use crate::error::{NetworkError, Result};
use crate::network::params::NetworkInitParameters;

fn default_epochs() -> usize {
    1
}

fn default_separator() -> char {
    ';'
}

fn default_encoding() -> TargetEncoding {
    TargetEncoding::Survival
}

/// Everything the command-line driver needs besides the dataset path.
///
/// Only `network` is required in the JSON form; every other field has a
/// default matching a single-pass, sequential run over `;`-separated data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub network: NetworkInitParameters,
    /// Passes over the training samples (per fold when cross-validating).
    #[serde(default = "default_epochs")]
    pub epochs: usize,
    /// Fixed seed for weight initialisation; drawn from entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_separator")]
    pub separator: char,
    /// Min-max scale the input features before training.
    #[serde(default)]
    pub normalize: bool,
    #[serde(default = "default_encoding")]
    pub encoding: TargetEncoding,
    /// Run cross-validation folds on the rayon pool.
    #[serde(default)]
    pub parallel: bool,
    /// Log training loss every this many epochs; `0` disables it.
    #[serde(default)]
    pub log_every: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            network: NetworkInitParameters::new(3, 1, vec![5]),
            epochs: default_epochs(),
            seed: None,
            separator: default_separator(),
            normalize: false,
            encoding: default_encoding(),
            parallel: false,
            log_every: 0,
        }
    }
}

impl RunConfig {
    /// Checks the network blueprint, the epoch count and that the output
    /// width fits the target encoding.
    pub fn validate(&self) -> Result<()> {
        self.network.validate()?;
        if self.epochs == 0 {
            return Err(NetworkError::config("epochs must be at least 1"));
        }
        if self.network.input_size != 3 {
            return Err(NetworkError::config(format!(
                "survival samples have 3 features, network expects {}",
                self.network.input_size
            )));
        }
        if self.network.output_size != self.encoding.output_size() {
            return Err(NetworkError::config(format!(
                "{:?} targets have {} values, network produces {}",
                self.encoding,
                self.encoding.output_size(),
                self.network.output_size
            )));
        }
        Ok(())
    }

    /// Deserializes and validates a config from a JSON file.
    pub fn load_json(path: &str) -> Result<RunConfig> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<RunConfig> {
        let config: RunConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_json_fills_defaults() {
        let config = RunConfig::from_json_str(
            r#"{"network": {"input_size": 3, "output_size": 1, "hidden_layer_sizes": [5]}}"#,
        )
        .unwrap();
        assert_eq!(config, RunConfig::default());
    }

    #[test]
    fn encoding_must_match_output_size() {
        let err = RunConfig::from_json_str(
            r#"{"network": {"input_size": 3, "output_size": 1}, "encoding": "two_class"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, NetworkError::Configuration(_)));

        let ok = RunConfig::from_json_str(
            r#"{"network": {"input_size": 3, "output_size": 2}, "encoding": "two_class", "seed": 4, "epochs": 10}"#,
        )
        .unwrap();
        assert_eq!(ok.seed, Some(4));
        assert_eq!(ok.epochs, 10);
    }

    #[test]
    fn load_json_reads_and_validates_a_file() {
        let path = std::env::temp_dir().join(format!("perceptron-loo-run-{}.json", std::process::id()));
        let path = path.to_str().unwrap();
        std::fs::write(
            path,
            r#"{"network": {"input_size": 3, "output_size": 1, "hidden_layer_sizes": [4]}, "parallel": true}"#,
        )
        .unwrap();
        let config = RunConfig::load_json(path).unwrap();
        std::fs::remove_file(path).unwrap();

        assert!(config.parallel);
        assert_eq!(config.network.hidden_layer_sizes, vec![4]);
        assert!(matches!(RunConfig::load_json(path), Err(NetworkError::Io(_))));
    }

    #[test]
    fn zero_epochs_is_rejected() {
        let config = RunConfig { epochs: 0, ..RunConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        assert!(matches!(RunConfig::from_json_str("{"), Err(NetworkError::Json(_))));
    }
}
