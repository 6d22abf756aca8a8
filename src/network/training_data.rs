use serde::{Serialize, Deserialize};

/// One input vector and the target it should map to.
///
/// `vector_out` is left empty when the data is only being propagated for
/// inference.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrainingData {
    pub vector_in: Vec<f64>,
    pub vector_out: Vec<f64>,
}

impl TrainingData {
    pub fn new(vector_in: Vec<f64>, vector_out: Vec<f64>) -> Self {
        TrainingData { vector_in, vector_out }
    }

    /// Input only, for inference.
    pub fn input(vector_in: Vec<f64>) -> Self {
        TrainingData { vector_in, vector_out: Vec::new() }
    }
}
