use crate::traits::{FloatScalar, Scalar};

use super::vector::DynVector;
use super::DynMatrix;

// ── Column access ───────────────────────────────────────────────────

impl<T: Scalar> DynMatrix<T> {
    /// Extract column `j` as a `DynVector`.
    ///
    /// ```
    /// use linkf::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// let c = m.col(1);
    /// assert_eq!(c[0], 2.0);
    /// assert_eq!(c[1], 4.0);
    /// ```
    pub fn col(&self, j: usize) -> DynVector<T> {
        assert!(j < self.ncols, "column {} out of bounds ({} columns)", j, self.ncols);
        DynVector::from_slice(&self.data[j * self.nrows..(j + 1) * self.nrows])
    }

    /// Set column `j` from a `DynVector`.
    pub fn set_col(&mut self, j: usize, v: &DynVector<T>) {
        assert!(j < self.ncols, "column {} out of bounds ({} columns)", j, self.ncols);
        assert_eq!(v.len(), self.nrows, "vector length mismatch");
        let n = self.nrows;
        self.data[j * n..(j + 1) * n].copy_from_slice(v.as_slice());
    }

    /// Iterate over columns as owned vectors.
    pub fn columns(&self) -> impl Iterator<Item = DynVector<T>> + '_ {
        (0..self.ncols).map(move |j| self.col(j))
    }
}

// ── Float predicates ────────────────────────────────────────────────

impl<T: FloatScalar> DynMatrix<T> {
    /// Whether the matrix is square and `|a_ij - a_ji| <= tol` for all pairs.
    ///
    /// ```
    /// use linkf::DynMatrix;
    /// let s = DynMatrix::from_rows(2, 2, &[2.0_f64, 1.0, 1.0, 3.0]);
    /// assert!(s.is_symmetric(0.0));
    /// ```
    pub fn is_symmetric(&self, tol: T) -> bool {
        if !self.is_square() {
            return false;
        }
        let n = self.nrows;
        (0..n).all(|i| ((i + 1)..n).all(|j| (self[(i, j)] - self[(j, i)]).abs() <= tol))
    }

    /// Whether every element is finite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|x| x.is_finite())
    }
}
