pub struct MseLoss;

impl MseLoss {
    /// Mean of the squares of already computed residuals.
    pub fn from_errors(errors: &[f64]) -> f64 {
        let n = errors.len() as f64;
        errors.iter().map(|e| e * e).sum::<f64>() / n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loss_is_mean_of_squares() {
        assert_eq!(MseLoss::from_errors(&[-1.0, 2.0]), 2.5);
    }
}
