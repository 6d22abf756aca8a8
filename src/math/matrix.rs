use serde::{Serialize, Deserialize};

use crate::error::{NetworkError, Result};

/// Dense row-major grid of `f64`.
///
/// A matrix may have zero rows while still remembering its column count;
/// the input placeholder layer of a `Network` relies on that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix::filled(rows, cols, 0.0)
    }

    pub fn filled(rows: usize, cols: usize, value: f64) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![value; cols]; rows]
        }
    }

    /// Wraps a vector as a 1×n row matrix.
    pub fn row_vector(values: Vec<f64>) -> Matrix {
        Matrix {
            rows: 1,
            cols: values.len(),
            data: vec![values],
        }
    }

    /// Builds a matrix from nested rows. Every row must have the same length;
    /// an empty outer vector yields a 0×0 matrix.
    pub fn from_data(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let rows = data.len();
        let cols = data.first().map_or(0, |row| row.len());
        if let Some(bad) = data.iter().find(|row| row.len() != cols) {
            return Err(NetworkError::DimensionMismatch {
                operation: "from_data",
                left: (rows, cols),
                right: (1, bad.len()),
            });
        }
        Ok(Matrix { rows, cols, data })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Swaps rows and columns. A matrix without rows transposes to one
    /// without columns; nothing is indexed.
    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for (i, row) in self.data.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                res.data[j][i] = value;
            }
        }

        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    /// Standard matrix product `self × rhs`.
    pub fn multiply(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.cols != rhs.rows {
            return Err(self.mismatch("multiply", rhs));
        }

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;

                for k in 0..self.cols {
                    sum += self.data[i][k] * rhs.data[k][j];
                }

                res.data[i][j] = sum;
            }
        }

        Ok(res)
    }

    /// Elementwise `self - rhs`.
    pub fn subtract(&self, rhs: &Matrix) -> Result<Matrix> {
        self.zip_with(rhs, "subtract", |a, b| a - b)
    }

    /// Elementwise (Hadamard) product.
    pub fn hadamard(&self, rhs: &Matrix) -> Result<Matrix> {
        self.zip_with(rhs, "hadamard", |a, b| a * b)
    }

    /// Outer product: entry (i, j) is `column[i] * row[j]`.
    pub fn outer_product(column: &[f64], row: &[f64]) -> Matrix {
        Matrix {
            rows: column.len(),
            cols: row.len(),
            data: column
                .iter()
                .map(|&c| row.iter().map(|&r| c * r).collect())
                .collect(),
        }
    }

    fn zip_with<F>(&self, rhs: &Matrix, operation: &'static str, op: F) -> Result<Matrix>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.shape() != rhs.shape() {
            return Err(self.mismatch(operation, rhs));
        }

        let data = self.data.iter().zip(rhs.data.iter())
            .map(|(row_a, row_b)| {
                row_a.iter().zip(row_b.iter()).map(|(&a, &b)| op(a, b)).collect()
            })
            .collect();

        Ok(Matrix { rows: self.rows, cols: self.cols, data })
    }

    fn mismatch(&self, operation: &'static str, rhs: &Matrix) -> NetworkError {
        NetworkError::DimensionMismatch {
            operation,
            left: self.shape(),
            right: rhs.shape(),
        }
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(data: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_data(data).unwrap()
    }

    #[test]
    fn multiply_computes_standard_product() {
        let a = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let b = m(vec![vec![7.0, 8.0], vec![9.0, 10.0], vec![11.0, 12.0]]);
        let c = a.multiply(&b).unwrap();
        assert_eq!(c, m(vec![vec![58.0, 64.0], vec![139.0, 154.0]]));
    }

    #[test]
    fn multiply_rejects_incompatible_shapes() {
        let a = Matrix::zeros(1, 3);
        let b = Matrix::zeros(4, 2);
        match a.multiply(&b) {
            Err(NetworkError::DimensionMismatch { operation, left, right }) => {
                assert_eq!(operation, "multiply");
                assert_eq!(left, (1, 3));
                assert_eq!(right, (4, 2));
            }
            other => panic!("expected DimensionMismatch, got {other:?}"),
        }
    }

    #[test]
    fn transpose_of_product_reverses_factors() {
        let a = m(vec![vec![1.0, -2.0, 0.5], vec![3.0, 4.0, -1.0]]);
        let b = m(vec![vec![2.0, 0.0], vec![1.0, -3.0], vec![0.25, 5.0]]);
        let left = a.multiply(&b).unwrap().transpose();
        let right = b.transpose().multiply(&a.transpose()).unwrap();
        assert_eq!(left, right);
    }

    #[test]
    fn transpose_handles_empty_matrices() {
        let empty = Matrix::default().transpose();
        assert_eq!(empty.shape(), (0, 0));
        assert!(empty.data.is_empty());

        let no_rows = Matrix::zeros(0, 3).transpose();
        assert_eq!(no_rows.shape(), (3, 0));
        assert!(no_rows.data.iter().all(|row| row.is_empty()));
    }

    #[test]
    fn subtract_requires_equal_shapes() {
        let a = m(vec![vec![5.0, 6.0]]);
        let b = m(vec![vec![1.0, 2.0]]);
        assert_eq!(a.subtract(&b).unwrap(), m(vec![vec![4.0, 4.0]]));
        assert!(matches!(
            a.subtract(&Matrix::zeros(2, 1)),
            Err(NetworkError::DimensionMismatch { operation: "subtract", .. })
        ));
    }

    #[test]
    fn outer_product_builds_column_by_row_grid() {
        let outer = Matrix::outer_product(&[1.0, 2.0, 3.0], &[10.0, -1.0]);
        assert_eq!(outer.shape(), (3, 2));
        assert_eq!(outer.data[2], vec![30.0, -3.0]);
        assert_eq!(outer.data[0], vec![10.0, -1.0]);
    }

    #[test]
    fn hadamard_multiplies_elementwise() {
        let a = Matrix::row_vector(vec![1.0, 2.0, 3.0]);
        let b = Matrix::row_vector(vec![4.0, 0.5, -1.0]);
        assert_eq!(a.hadamard(&b).unwrap().data[0], vec![4.0, 1.0, -3.0]);
    }

    #[test]
    fn from_data_rejects_ragged_rows() {
        assert!(Matrix::from_data(vec![vec![1.0, 2.0], vec![3.0]]).is_err());
        assert_eq!(Matrix::from_data(vec![]).unwrap(), Matrix::default());
    }
}
