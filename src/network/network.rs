use log::{debug, trace};
use rand::Rng;

use crate::error::{NetworkError, Result};
use crate::layers::layer::Layer;
use crate::math::matrix::Matrix;
use crate::network::params::{validate_learning_rate, NetworkInitParameters};
use crate::network::training_data::TrainingData;

/// Fully connected feed-forward network trained one sample at a time.
///
/// `layers[0]` is a weightless placeholder (0×`input_size`) whose cache holds
/// the most recent raw input. Every following layer maps the previous
/// layer's width to its own, and the last one produces `output_size` values.
///
/// `propagate` rewrites the per-layer output caches that `back_propagate`
/// reads, which is why both take `&mut self`. Share a network between
/// threads only behind a lock.
///
/// The layer list is only reshaped through `append_layer`, so the widths
/// always chain from `input_size` to `output_size`.
#[derive(Debug, Clone)]
pub struct Network {
    input_size: usize,
    output_size: usize,
    layers: Vec<Layer>,
    learning_rate: f64,
}

impl Network {
    /// Placeholder plus a single randomized `input_size`×`output_size` layer.
    pub fn new<R: Rng + ?Sized>(input_size: usize, output_size: usize, rng: &mut R) -> Result<Network> {
        if input_size == 0 || output_size == 0 {
            return Err(NetworkError::config(format!(
                "network sizes must be positive, got {input_size} inputs and {output_size} outputs"
            )));
        }

        Ok(Network {
            input_size,
            output_size,
            layers: vec![
                Layer::placeholder(input_size),
                Layer::new(input_size, output_size, rng),
            ],
            learning_rate: 1.0,
        })
    }

    /// Builds a network shaped by `params`, appending its hidden layers in order.
    pub fn from_params<R: Rng + ?Sized>(params: &NetworkInitParameters, rng: &mut R) -> Result<Network> {
        params.validate()?;
        let mut network = Network::new(params.input_size, params.output_size, rng)?;
        for &size in &params.hidden_layer_sizes {
            network.append_layer(size, rng)?;
        }
        network.learning_rate = params.learning_rate;
        Ok(network)
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    /// Placeholder first, output layer last.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) -> Result<()> {
        validate_learning_rate(learning_rate)?;
        self.learning_rate = learning_rate;
        Ok(())
    }

    /// `(rows, columns)` of every layer, placeholder included.
    pub fn shape(&self) -> Vec<(usize, usize)> {
        self.layers
            .iter()
            .map(|layer| (layer.weights.rows(), layer.weights.columns()))
            .collect()
    }

    /// Inserts an `n`-wide hidden layer just before the output layer.
    ///
    /// The existing output layer is discarded and rebuilt as `n`×`output_size`;
    /// both new layers get fresh random weights.
    pub fn append_layer<R: Rng + ?Sized>(&mut self, n: usize, rng: &mut R) -> Result<()> {
        if n == 0 {
            return Err(NetworkError::config("hidden layer size must be positive"));
        }

        self.layers.pop();
        let previous = self.layers.last().map_or(self.input_size, Layer::size);
        self.layers.push(Layer::new(previous, n, rng));
        self.layers.push(Layer::new(n, self.output_size, rng));

        debug!("appended {previous}x{n} hidden layer, shape now {:?}", self.shape());
        Ok(())
    }

    /// Forward pass. Caches the raw input in the placeholder and every
    /// layer's activated output in that layer.
    pub fn propagate(&mut self, data: &TrainingData) -> Result<Vec<f64>> {
        if data.vector_in.len() != self.input_size {
            return Err(NetworkError::config(format!(
                "input vector has {} values, network expects {}",
                data.vector_in.len(),
                self.input_size
            )));
        }

        let mut vector = data.vector_in.clone();
        self.layers[0].store_output(vector.clone());
        for layer in self.layers.iter_mut().skip(1) {
            vector = layer.feed_from(&vector)?;
        }

        Ok(vector)
    }

    /// Convenience wrapper around `propagate` for a bare input vector.
    pub fn predict(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        self.propagate(&TrainingData::input(input.to_vec()))
    }

    /// `target - output`, element by element. Runs a forward pass.
    pub fn calculate_error(&mut self, data: &TrainingData) -> Result<Vec<f64>> {
        if data.vector_out.len() != self.output_size {
            return Err(NetworkError::config(format!(
                "target vector has {} values, network expects {}",
                data.vector_out.len(),
                self.output_size
            )));
        }

        let output = self.propagate(data)?;
        Ok(data.vector_out.iter().zip(output.iter()).map(|(y, o)| y - o).collect())
    }

    /// One online gradient step on a single sample.
    ///
    /// Runs its own forward pass, then walks from the output layer back to
    /// the first real layer. Each layer's delta is `error ⊙ σ'(output)`, the
    /// error handed to the layer below is `delta × Wᵀ` (taken before the
    /// update), and the weights move by `learning_rate · (input ⊗ delta)`.
    ///
    /// Returns the output error measured before the weights changed.
    pub fn back_propagate(&mut self, data: &TrainingData) -> Result<Vec<f64>> {
        let output_error = self.calculate_error(data)?;
        let mut error = output_error.clone();

        for idx in (1..self.layers.len()).rev() {
            let delta = self.layers[idx].delta(&error)?;
            error = self.layers[idx].back_error(&delta)?;

            let gradient = Matrix::outer_product(self.layers[idx - 1].last_output(), &delta);
            self.layers[idx].apply_gradient(&gradient, self.learning_rate)?;
        }

        trace!("back-propagated sample, output error {output_error:?}");
        Ok(output_error)
    }
}
