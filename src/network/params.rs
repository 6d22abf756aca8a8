use serde::{Serialize, Deserialize};

use crate::error::{NetworkError, Result};

fn default_learning_rate() -> f64 {
    1.0
}

/// Blueprint for building identically shaped, freshly randomized networks.
///
/// Fields:
/// - `input_size`         — width of the input vector
/// - `output_size`        — width of the output vector
/// - `hidden_layer_sizes` — hidden layer widths, input side first
/// - `learning_rate`      — step size of the weight update; `1.0` applies the
///                          raw gradient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkInitParameters {
    pub input_size: usize,
    pub output_size: usize,
    #[serde(default)]
    pub hidden_layer_sizes: Vec<usize>,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
}

impl NetworkInitParameters {
    pub fn new(input_size: usize, output_size: usize, hidden_layer_sizes: Vec<usize>) -> Self {
        NetworkInitParameters {
            input_size,
            output_size,
            hidden_layer_sizes,
            learning_rate: default_learning_rate(),
        }
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Checks every size is positive and the learning rate is usable.
    pub fn validate(&self) -> Result<()> {
        if self.input_size == 0 || self.output_size == 0 {
            return Err(NetworkError::config(format!(
                "input and output sizes must be positive, got {} and {}",
                self.input_size, self.output_size
            )));
        }
        if let Some(pos) = self.hidden_layer_sizes.iter().position(|&n| n == 0) {
            return Err(NetworkError::config(format!("hidden layer {pos} has size 0")));
        }
        validate_learning_rate(self.learning_rate)
    }
}

pub(crate) fn validate_learning_rate(learning_rate: f64) -> Result<()> {
    if learning_rate.is_finite() && learning_rate > 0.0 {
        Ok(())
    } else {
        Err(NetworkError::config(format!(
            "learning rate must be a positive finite number, got {learning_rate}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn learning_rate_defaults_to_one_when_absent_from_json() {
        let params: NetworkInitParameters =
            serde_json::from_str(r#"{"input_size": 3, "output_size": 1, "hidden_layer_sizes": [5]}"#)
                .unwrap();
        assert_eq!(params, NetworkInitParameters::new(3, 1, vec![5]));
        assert_eq!(params.learning_rate, 1.0);
    }

    #[test]
    fn validate_rejects_zero_sizes() {
        assert!(NetworkInitParameters::new(0, 1, vec![]).validate().is_err());
        assert!(NetworkInitParameters::new(3, 1, vec![4, 0]).validate().is_err());
        assert!(NetworkInitParameters::new(3, 1, vec![]).with_learning_rate(0.0).validate().is_err());
        assert!(NetworkInitParameters::new(3, 2, vec![5]).validate().is_ok());
    }
}
