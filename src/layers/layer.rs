use rand::Rng;

use crate::activation::activation::ActivationFunction;
use crate::error::Result;
use crate::layers::weights::WeightMatrix;
use crate::math::matrix::Matrix;

/// One weight matrix plus the activations it produced on the latest
/// forward pass.
///
/// `last_output` is mutable state written by `Network::propagate` and read
/// back during backpropagation; it is not recomputed on demand.
#[derive(Debug, Clone)]
pub struct Layer {
    pub weights: WeightMatrix,
    last_output: Vec<f64>,
}

impl Layer {
    /// A `rows`×`columns` layer with randomized weights.
    pub fn new<R: Rng + ?Sized>(rows: usize, columns: usize, rng: &mut R) -> Layer {
        let mut weights = WeightMatrix::new(rows, columns);
        weights.randomize(rng);
        Layer::from_weights(weights)
    }

    /// The weightless slot standing for the raw network input.
    pub fn placeholder(input_size: usize) -> Layer {
        Layer::from_weights(WeightMatrix::new(0, input_size))
    }

    pub fn from_weights(weights: WeightMatrix) -> Layer {
        let last_output = vec![0.0; weights.columns()];
        Layer { weights, last_output }
    }

    pub fn size(&self) -> usize {
        self.weights.columns()
    }

    pub fn last_output(&self) -> &[f64] {
        &self.last_output
    }

    pub(crate) fn store_output(&mut self, output: Vec<f64>) {
        self.last_output = output;
    }

    /// `sigmoid(input × weights)`; the result is cached and returned.
    pub fn feed_from(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        let z = Matrix::row_vector(input.to_vec()).multiply(&self.weights.matrix)?;
        let sigmoid = ActivationFunction::sigmoid();
        let output = z.data
            .into_iter()
            .next()
            .map(|row| sigmoid.apply(&row))
            .unwrap_or_default();
        self.last_output = output.clone();
        Ok(output)
    }

    /// Local error signal `error ⊙ σ'(last_output)`.
    pub fn delta(&self, error: &[f64]) -> Result<Vec<f64>> {
        let derivative = ActivationFunction::sigmoid_derivative().apply(&self.last_output);
        let delta = Matrix::row_vector(error.to_vec())
            .hadamard(&Matrix::row_vector(derivative))?;
        Ok(delta.data.into_iter().next().unwrap_or_default())
    }

    /// Pushes `delta` back through the weights: `delta × weightsᵀ`.
    pub fn back_error(&self, delta: &[f64]) -> Result<Vec<f64>> {
        let error = Matrix::row_vector(delta.to_vec())
            .multiply(&self.weights.matrix.transpose())?;
        Ok(error.data.into_iter().next().unwrap_or_default())
    }

    /// `weights -= learning_rate * gradient`.
    pub fn apply_gradient(&mut self, gradient: &Matrix, learning_rate: f64) -> Result<()> {
        let scaled = gradient.map(|x| x * learning_rate);
        self.weights.matrix = self.weights.matrix.subtract(&scaled)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkError;

    fn fixed(data: Vec<Vec<f64>>) -> Layer {
        Layer::from_weights(WeightMatrix::from_matrix(Matrix::from_data(data).unwrap()))
    }

    #[test]
    fn cache_starts_zeroed_at_layer_width() {
        let layer = Layer::placeholder(3);
        assert_eq!(layer.last_output(), &[0.0, 0.0, 0.0]);
        assert_eq!(layer.weights.rows(), 0);
    }

    #[test]
    fn feed_from_caches_activated_output() {
        let mut layer = fixed(vec![vec![1.0, 0.0], vec![0.0, -2.0]]);
        let out = layer.feed_from(&[0.0, 1.0]).unwrap();
        assert_eq!(out.len(), 2);
        assert!((out[0] - 0.5).abs() < 1e-12);
        assert!((out[1] - 1.0 / (1.0 + (-2.0f64).exp())).abs() < 1e-12);
        assert_eq!(layer.last_output(), out.as_slice());
    }

    #[test]
    fn feed_from_rejects_wrong_input_width() {
        let mut layer = fixed(vec![vec![1.0], vec![1.0]]);
        assert!(matches!(
            layer.feed_from(&[1.0, 2.0, 3.0]),
            Err(NetworkError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn apply_gradient_scales_by_learning_rate() {
        let mut layer = fixed(vec![vec![1.0, 1.0]]);
        let gradient = Matrix::row_vector(vec![0.5, -0.5]);
        layer.apply_gradient(&gradient, 0.5).unwrap();
        assert_eq!(layer.weights.matrix.data[0], vec![0.75, 1.25]);
    }
}
