use alloc::vec;
use alloc::vec::Vec;

use crate::linalg::lu::{lu_in_place, lu_solve};
use crate::linalg::LinalgError;
use crate::traits::FloatScalar;

use super::vector::DynVector;
use super::DynMatrix;

/// LU decomposition of a dynamically-sized square matrix.
///
/// Stores the packed L/U factors and permutation vector.
///
/// # Example
///
/// ```
/// use linkf::{DynMatrix, DynVector};
///
/// let a = DynMatrix::from_rows(2, 2, &[2.0_f64, 1.0, 5.0, 3.0]);
/// let lu = a.lu().unwrap();
///
/// let b = DynVector::from_slice(&[4.0, 11.0]);
/// let x = lu.solve(&b);
/// assert!((x[0] - 1.0).abs() < 1e-12);
/// assert!((x[1] - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct DynLu<T> {
    lu: DynMatrix<T>,
    perm: Vec<usize>,
    even: bool,
}

impl<T: FloatScalar> DynLu<T> {
    /// Decompose a matrix. Returns an error if the matrix is singular.
    pub fn new(a: &DynMatrix<T>) -> Result<Self, LinalgError> {
        assert!(a.is_square(), "LU decomposition requires a square matrix");
        let mut lu = a.clone();
        let mut perm = vec![0usize; a.nrows()];
        let even = lu_in_place(&mut lu, &mut perm)?;
        Ok(Self { lu, perm, even })
    }

    /// Solve Ax = b for x.
    pub fn solve(&self, b: &DynVector<T>) -> DynVector<T> {
        let n = self.lu.nrows();
        assert_eq!(b.len(), n, "rhs length mismatch");
        let mut x = vec![T::zero(); n];
        lu_solve(&self.lu, &self.perm, b.as_slice(), &mut x);
        DynVector::from_vec(x)
    }

    /// Compute the matrix inverse, one unit column at a time.
    pub fn inverse(&self) -> DynMatrix<T> {
        let n = self.lu.nrows();
        let mut data = Vec::with_capacity(n * n);
        let mut e = vec![T::zero(); n];
        let mut col_buf = vec![T::zero(); n];

        for col in 0..n {
            if col > 0 {
                e[col - 1] = T::zero();
            }
            e[col] = T::one();
            lu_solve(&self.lu, &self.perm, &e, &mut col_buf);
            data.extend_from_slice(&col_buf);
        }

        DynMatrix::from_vec(n, n, data)
    }

    /// Compute the determinant.
    pub fn det(&self) -> T {
        let sign = if self.even { T::one() } else { -T::one() };
        (0..self.lu.nrows()).fold(sign, |d, i| d * self.lu[(i, i)])
    }
}

impl<T: FloatScalar> DynMatrix<T> {
    /// LU decomposition with partial pivoting.
    pub fn lu(&self) -> Result<DynLu<T>, LinalgError> {
        DynLu::new(self)
    }

    /// Solve `Ax = b` via LU.
    pub fn solve(&self, b: &DynVector<T>) -> Result<DynVector<T>, LinalgError> {
        Ok(self.lu()?.solve(b))
    }

    /// Matrix inverse via LU.
    ///
    /// ```
    /// use linkf::DynMatrix;
    /// let a = DynMatrix::from_rows(2, 2, &[4.0_f64, 7.0, 2.0, 6.0]);
    /// let inv = a.inverse().unwrap();
    /// let id = &a * &inv;
    /// assert!((id[(0, 0)] - 1.0).abs() < 1e-12);
    /// assert!(id[(0, 1)].abs() < 1e-12);
    /// ```
    pub fn inverse(&self) -> Result<DynMatrix<T>, LinalgError> {
        Ok(self.lu()?.inverse())
    }

    /// Determinant via LU; zero for singular input.
    pub fn det(&self) -> T {
        self.lu().map_or(T::zero(), |lu| lu.det())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_near(a: &DynMatrix<f64>, b: &DynMatrix<f64>, tol: f64) {
        assert_eq!(a.shape(), b.shape());
        for (x, y) in a.as_slice().iter().zip(b.as_slice()) {
            assert!((x - y).abs() < tol, "{:?} vs {:?}", a, b);
        }
    }

    #[test]
    fn inverse_3x3() {
        let a = DynMatrix::from_rows(3, 3, &[4.0, 7.0, 2.0, 3.0, 6.0, 1.0, 2.0, 5.0, 3.0]);
        let inv = a.inverse().unwrap();
        assert_near(&(&a * &inv), &DynMatrix::eye(3, 0.0), 1e-12);
        assert_near(&(&inv * &a), &DynMatrix::eye(3, 0.0), 1e-12);
    }

    #[test]
    fn inverse_1x1() {
        let a = DynMatrix::from_rows(1, 1, &[4.0]);
        assert_eq!(a.inverse().unwrap()[(0, 0)], 0.25);
    }

    #[test]
    fn inverse_empty() {
        let a = DynMatrix::<f64>::zeros(0, 0, 0.0);
        assert_eq!(a.inverse().unwrap().shape(), (0, 0));
    }

    #[test]
    fn inverse_singular() {
        let a = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 4.0]);
        assert_eq!(a.inverse(), Err(LinalgError::Singular));
    }

    #[test]
    fn det() {
        let a = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
        assert!((a.det() + 2.0).abs() < 1e-12);
        let s = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 4.0]);
        assert_eq!(s.det(), 0.0);
    }

    #[test]
    fn solve() {
        let a = DynMatrix::from_rows(2, 2, &[2.0_f64, 1.0, 5.0, 3.0]);
        let x = a.solve(&DynVector::from_slice(&[4.0, 11.0])).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] - 2.0).abs() < 1e-12);
    }
}
