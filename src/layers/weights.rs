use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::math::matrix::Matrix;

/// Connection weights between two adjacent layers, `rows` inputs by
/// `columns` outputs. Also known as the layer's perceptron.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightMatrix {
    pub matrix: Matrix,
}

impl WeightMatrix {
    /// Lower bound of the randomized weights; the upper bound is exclusive.
    pub const RANDOM_LOW: i32 = -5;
    pub const RANDOM_HIGH: i32 = 5;

    /// All-zero weights.
    pub fn new(rows: usize, columns: usize) -> WeightMatrix {
        WeightMatrix::with_default(rows, columns, 0.0)
    }

    pub fn with_default(rows: usize, columns: usize, value: f64) -> WeightMatrix {
        WeightMatrix { matrix: Matrix::filled(rows, columns, value) }
    }

    pub fn from_matrix(matrix: Matrix) -> WeightMatrix {
        WeightMatrix { matrix }
    }

    pub fn rows(&self) -> usize {
        self.matrix.rows
    }

    pub fn columns(&self) -> usize {
        self.matrix.cols
    }

    /// Overwrites every weight with an integer drawn from [0, 10) and shifted
    /// down by 5, so weights land on the whole numbers in [-5, 5).
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let span = Self::RANDOM_HIGH - Self::RANDOM_LOW;
        for row in self.matrix.data.iter_mut() {
            for weight in row.iter_mut() {
                *weight = f64::from(rng.gen_range(0..span) + Self::RANDOM_LOW);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn new_matrix_is_zeroed_with_requested_shape() {
        let w = WeightMatrix::new(3, 5);
        assert_eq!((w.rows(), w.columns()), (3, 5));
        assert_eq!(w.matrix.data.len(), 3);
        assert!(w.matrix.data.iter().all(|row| row.len() == 5 && row.iter().all(|&x| x == 0.0)));
    }

    #[test]
    fn randomize_draws_whole_numbers_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut w = WeightMatrix::new(20, 20);
        w.randomize(&mut rng);
        for &x in w.matrix.data.iter().flatten() {
            assert!((-5.0..5.0).contains(&x), "{x} out of range");
            assert_eq!(x.fract(), 0.0);
        }
        // 400 draws over 10 values should hit both ends of the range.
        let values: Vec<f64> = w.matrix.data.iter().flatten().copied().collect();
        assert!(values.contains(&-5.0));
        assert!(values.contains(&4.0));
    }

    #[test]
    fn randomize_is_reproducible_for_a_seed() {
        let mut a = WeightMatrix::new(4, 3);
        let mut b = WeightMatrix::new(4, 3);
        a.randomize(&mut StdRng::seed_from_u64(42));
        b.randomize(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn randomize_leaves_empty_matrix_untouched() {
        let mut w = WeightMatrix::new(0, 3);
        w.randomize(&mut StdRng::seed_from_u64(1));
        assert_eq!((w.rows(), w.columns()), (0, 3));
    }
}
