//! Dense row-major matrices.
//!
//! Every operation takes `&self` and returns a fresh `Matrix`, so intermediate values in
//! the training formulas never alias each other. Shapes are validated at the call and
//! reported as [`Error::ShapeMismatch`].

use rand::Rng;

use crate::matmul::gemm_f32;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    /// Row-major, `rows * cols` values.
    data: Vec<f32>,
}

impl Matrix {
    /// A `rows x cols` matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        let len = check_dims(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            data: vec![0.0; len],
        })
    }

    /// A `rows x cols` matrix with entries drawn uniformly from `[-1, 1)`.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Result<Self> {
        Ok(Self::zeros(rows, cols)?.randomize(rng))
    }

    /// Build from row-major `data`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self> {
        if data.len() != check_dims(rows, cols)? {
            return Err(Error::InvalidDimension(format!(
                "data length {} does not match rows * cols ({rows} * {cols})",
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Column vector (`N x 1`) where `values[i]` lands in row `i`.
    pub fn from_column(values: &[f32]) -> Result<Self> {
        Self::from_vec(values.len(), 1, values.to_vec())
    }

    /// Inverse of [`Matrix::from_column`].
    pub fn to_column_vec(&self) -> Result<Vec<f32>> {
        if self.cols != 1 {
            return Err(Error::ShapeMismatch(format!(
                "expected a column vector, got {}x{}",
                self.rows, self.cols
            )));
        }
        Ok(self.data.clone())
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Row-major view of the entries.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Panics if `(row, col)` is out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(row < self.rows && col < self.cols, "index ({row}, {col}) out of bounds");
        self.data[row * self.cols + col]
    }

    /// Panics if `(row, col)` is out of bounds.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        assert!(row < self.rows && col < self.cols, "index ({row}, {col}) out of bounds");
        self.data[row * self.cols + col] = value;
    }

    /// Same shape, every entry redrawn uniformly from `[-1, 1)`.
    pub fn randomize<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        self.map(|_, _, _| rng.gen_range(-1.0..1.0))
    }

    pub fn add(&self, other: &Matrix) -> Result<Self> {
        self.zip_with(other, "add", |a, b| a + b)
    }

    pub fn sub(&self, other: &Matrix) -> Result<Self> {
        self.zip_with(other, "sub", |a, b| a - b)
    }

    /// Elementwise (Hadamard) product.
    pub fn hadamard(&self, other: &Matrix) -> Result<Self> {
        self.zip_with(other, "hadamard", |a, b| a * b)
    }

    pub fn scale(&self, k: f32) -> Self {
        self.map(|v, _, _| v * k)
    }

    /// Matrix product `self · other`, shape `(self.rows, other.cols)`.
    pub fn dot(&self, other: &Matrix) -> Result<Self> {
        if self.cols != other.rows {
            return Err(Error::ShapeMismatch(format!(
                "dot: left is {}x{}, right is {}x{}",
                self.rows, self.cols, other.rows, other.cols
            )));
        }
        let mut data = vec![0.0; self.rows * other.cols];
        gemm_f32(
            self.rows,
            other.cols,
            self.cols,
            &self.data,
            &other.data,
            &mut data,
        );
        Ok(Self {
            rows: self.rows,
            cols: other.cols,
            data,
        })
    }

    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for c in 0..self.cols {
            for r in 0..self.rows {
                data.push(self.data[r * self.cols + c]);
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    /// Applies `f(value, row, col)` to every entry.
    pub fn map<F>(&self, mut f: F) -> Self
    where
        F: FnMut(f32, usize, usize) -> f32,
    {
        let data = self
            .data
            .iter()
            .enumerate()
            .map(|(idx, &v)| f(v, idx / self.cols, idx % self.cols))
            .collect();
        Self {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }

    /// Arithmetic mean of all entries.
    pub fn average(&self) -> f32 {
        self.data.iter().sum::<f32>() / self.data.len() as f32
    }

    /// Uniform crossover: each entry is taken from `self` or `other` with equal odds.
    pub fn blend<R: Rng + ?Sized>(&self, other: &Matrix, rng: &mut R) -> Result<Self> {
        self.zip_with(other, "blend", |a, b| if rng.gen_bool(0.5) { a } else { b })
    }

    fn zip_with<F>(&self, other: &Matrix, op: &str, mut f: F) -> Result<Self>
    where
        F: FnMut(f32, f32) -> f32,
    {
        if self.shape() != other.shape() {
            return Err(Error::ShapeMismatch(format!(
                "{op}: left is {}x{}, right is {}x{}",
                self.rows, self.cols, other.rows, other.cols
            )));
        }
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }
}

/// Returns `rows * cols`.
fn check_dims(rows: usize, cols: usize) -> Result<usize> {
    if rows == 0 || cols == 0 {
        return Err(Error::InvalidDimension(format!(
            "matrix dims must be > 0, got {rows}x{cols}"
        )));
    }
    rows.checked_mul(cols).ok_or_else(|| {
        Error::InvalidDimension(format!("matrix dims {rows}x{cols} overflow usize"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn m(rows: usize, cols: usize, data: &[f32]) -> Matrix {
        Matrix::from_vec(rows, cols, data.to_vec()).unwrap()
    }

    #[test]
    fn zeros_rejects_empty_dims() {
        assert!(matches!(
            Matrix::zeros(0, 3),
            Err(Error::InvalidDimension(_))
        ));
        assert!(matches!(
            Matrix::zeros(3, 0),
            Err(Error::InvalidDimension(_))
        ));
        let z = Matrix::zeros(2, 3).unwrap();
        assert_eq!(z.shape(), (2, 3));
        assert!(z.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn element_count_overflow_is_rejected() {
        let huge = 1_usize << (usize::BITS - 1);
        assert!(matches!(
            Matrix::from_vec(huge, 2, vec![]),
            Err(Error::InvalidDimension(_))
        ));
        assert!(matches!(
            Matrix::zeros(usize::MAX, 2),
            Err(Error::InvalidDimension(_))
        ));
    }

    #[test]
    fn random_entries_are_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let r = Matrix::random(16, 16, &mut rng).unwrap();
        assert!(r.as_slice().iter().all(|&v| (-1.0..1.0).contains(&v)));
        // Not all equal.
        assert!(r.as_slice().iter().any(|&v| v != r.get(0, 0)));
    }

    #[test]
    fn column_round_trip_preserves_order() {
        let col = Matrix::from_column(&[3.0, 1.0, 2.0]).unwrap();
        assert_eq!(col.shape(), (3, 1));
        assert_eq!(col.get(0, 0), 3.0);
        assert_eq!(col.get(2, 0), 2.0);
        assert_eq!(col.to_column_vec().unwrap(), vec![3.0, 1.0, 2.0]);

        assert!(matches!(
            Matrix::from_column(&[]),
            Err(Error::InvalidDimension(_))
        ));
        assert!(matches!(
            m(1, 2, &[1.0, 2.0]).to_column_vec(),
            Err(Error::ShapeMismatch(_))
        ));
    }

    #[test]
    fn elementwise_ops() {
        let a = m(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let b = m(2, 2, &[0.5, -1.0, 2.0, 0.0]);
        assert_eq!(a.add(&b).unwrap().as_slice(), &[1.5, 1.0, 5.0, 4.0]);
        assert_eq!(a.sub(&b).unwrap().as_slice(), &[0.5, 3.0, 1.0, 4.0]);
        assert_eq!(a.hadamard(&b).unwrap().as_slice(), &[0.5, -2.0, 6.0, 0.0]);
        assert_eq!(a.scale(2.0).as_slice(), &[2.0, 4.0, 6.0, 8.0]);

        let c = m(1, 4, &[1.0, 2.0, 3.0, 4.0]);
        assert!(matches!(a.add(&c), Err(Error::ShapeMismatch(_))));
        assert!(matches!(a.sub(&c), Err(Error::ShapeMismatch(_))));
        assert!(matches!(a.hadamard(&c), Err(Error::ShapeMismatch(_))));
    }

    #[test]
    fn ops_do_not_touch_operands() {
        let a = m(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let before = a.clone();
        let _ = a.add(&a).unwrap();
        let _ = a.scale(10.0);
        let _ = a.transpose();
        assert_eq!(a, before);
    }

    #[test]
    fn dot_and_transpose() {
        let a = m(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let at = a.transpose();
        assert_eq!(at.shape(), (3, 2));
        assert_eq!(at.get(2, 1), a.get(1, 2));
        assert_eq!(at.as_slice(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);

        let x = Matrix::from_column(&[1.0, 0.0, -1.0]).unwrap();
        let y = a.dot(&x).unwrap();
        assert_eq!(y.shape(), (2, 1));
        assert_eq!(y.as_slice(), &[-2.0, -2.0]);

        assert!(matches!(a.dot(&a), Err(Error::ShapeMismatch(_))));
    }

    #[test]
    fn map_sees_row_and_col() {
        let a = Matrix::zeros(2, 3).unwrap();
        let idx = a.map(|_, r, c| (r * 10 + c) as f32);
        assert_eq!(idx.as_slice(), &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
    }

    #[test]
    fn average_is_mean() {
        assert_eq!(m(2, 2, &[1.0, 2.0, 3.0, 6.0]).average(), 3.0);
    }

    #[test]
    fn blend_picks_from_either_parent() {
        let mut rng = StdRng::seed_from_u64(1);
        let a = Matrix::zeros(8, 8).unwrap();
        let b = a.map(|_, _, _| 1.0);
        let child = a.blend(&b, &mut rng).unwrap();

        let ones = child.as_slice().iter().filter(|&&v| v == 1.0).count();
        let zeros = child.as_slice().iter().filter(|&&v| v == 0.0).count();
        assert_eq!(ones + zeros, 64);
        assert!(ones > 0 && zeros > 0);

        let c = Matrix::zeros(4, 8).unwrap();
        assert!(matches!(a.blend(&c, &mut rng), Err(Error::ShapeMismatch(_))));
    }

    #[test]
    fn clone_is_deep() {
        let a = m(1, 2, &[1.0, 2.0]);
        let mut b = a.clone();
        b.set(0, 0, 9.0);
        assert_eq!(a.get(0, 0), 1.0);
        assert_eq!(b.get(0, 0), 9.0);
    }
}
