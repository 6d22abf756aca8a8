use serde::{Serialize, Deserialize};

/// Transfer functions used by the network, each parameterised the way it is
/// called at its use site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActivationFunction {
    /// Step function: `1.0` once `x` reaches `threshold`, else `0.0`.
    /// Not differentiable; only meant for turning outputs into decisions.
    Unipolar { threshold: f64 },
    /// Logistic curve `1 / (1 + e^(-beta * x))`. The network calls it with
    /// `beta = -1`, which makes it `1 / (1 + e^x)`.
    Sigmoid { beta: f64 },
    /// Logistic derivative written in terms of an already activated value:
    /// `x * (1 - x)`. `beta` is carried for symmetry with `Sigmoid` only.
    SigmoidDerivative { beta: f64 },
    /// `e^x / sum(e^v)` over `context`. An empty context divides by zero.
    Softmax { context: Vec<f64> },
}

impl ActivationFunction {
    /// The `beta` the network uses for every hidden and output unit.
    pub const NETWORK_BETA: f64 = -1.0;

    pub fn sigmoid() -> Self {
        ActivationFunction::Sigmoid { beta: Self::NETWORK_BETA }
    }

    pub fn sigmoid_derivative() -> Self {
        ActivationFunction::SigmoidDerivative { beta: Self::NETWORK_BETA }
    }

    pub fn perform(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Unipolar { threshold } => if x >= *threshold { 1.0 } else { 0.0 },
            ActivationFunction::Sigmoid { beta } => 1.0 / (1.0 + (-beta * x).exp()),
            ActivationFunction::SigmoidDerivative { .. } => x * (1.0 - x),
            ActivationFunction::Softmax { context } => {
                let denominator: f64 = context.iter().map(|v| v.exp()).sum();
                x.exp() / denominator
            }
        }
    }

    /// Element-wise `perform` over a vector.
    pub fn apply(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&x| self.perform(x)).collect()
    }

    /// Softmax of a whole vector, using the vector itself as the context.
    pub fn softmax(values: &[f64]) -> Vec<f64> {
        ActivationFunction::Softmax { context: values.to_vec() }.apply(values)
    }
}
