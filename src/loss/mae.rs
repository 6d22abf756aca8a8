pub struct MaeLoss;

impl MaeLoss {
    /// Mean of the magnitudes of already computed residuals.
    pub fn from_errors(errors: &[f64]) -> f64 {
        let n = errors.len() as f64;
        errors.iter().map(|e| e.abs()).sum::<f64>() / n
    }
}
