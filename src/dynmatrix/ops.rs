use alloc::vec;
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use crate::traits::Scalar;

use super::{DynMatrix, DynVector};

// ── Element-wise addition / subtraction ─────────────────────────────
//
// Every owned/borrowed operand combination funnels into one
// `&a op &b` kernel. Shape mismatches are caller bugs and panic.

fn zip_with<T: Scalar>(
    a: &DynMatrix<T>,
    b: &DynMatrix<T>,
    sym: &str,
    f: impl Fn(T, T) -> T,
) -> DynMatrix<T> {
    assert_eq!(
        a.shape(),
        b.shape(),
        "dimension mismatch: {}x{} {} {}x{}",
        a.nrows,
        a.ncols,
        sym,
        b.nrows,
        b.ncols,
    );
    let data = a
        .data
        .iter()
        .zip(b.data.iter())
        .map(|(&x, &y)| f(x, y))
        .collect();
    DynMatrix {
        nrows: a.nrows,
        ncols: a.ncols,
        data,
    }
}

macro_rules! impl_elementwise {
    ($trait:ident, $method:ident, $sym:literal) => {
        impl<T: Scalar> $trait<&DynMatrix<T>> for &DynMatrix<T> {
            type Output = DynMatrix<T>;
            fn $method(self, rhs: &DynMatrix<T>) -> DynMatrix<T> {
                zip_with(self, rhs, $sym, |x, y| x.$method(y))
            }
        }

        impl<T: Scalar> $trait<DynMatrix<T>> for &DynMatrix<T> {
            type Output = DynMatrix<T>;
            fn $method(self, rhs: DynMatrix<T>) -> DynMatrix<T> {
                self.$method(&rhs)
            }
        }

        impl<T: Scalar> $trait<&DynMatrix<T>> for DynMatrix<T> {
            type Output = DynMatrix<T>;
            fn $method(self, rhs: &DynMatrix<T>) -> DynMatrix<T> {
                (&self).$method(rhs)
            }
        }

        impl<T: Scalar> $trait for DynMatrix<T> {
            type Output = DynMatrix<T>;
            fn $method(self, rhs: DynMatrix<T>) -> DynMatrix<T> {
                (&self).$method(&rhs)
            }
        }
    };
}

impl_elementwise!(Add, add, "+");
impl_elementwise!(Sub, sub, "-");

impl<T: Scalar> AddAssign<&DynMatrix<T>> for DynMatrix<T> {
    fn add_assign(&mut self, rhs: &DynMatrix<T>) {
        assert_eq!(self.shape(), rhs.shape(), "dimension mismatch in +=");
        for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
            *a = *a + b;
        }
    }
}

impl<T: Scalar> SubAssign<&DynMatrix<T>> for DynMatrix<T> {
    fn sub_assign(&mut self, rhs: &DynMatrix<T>) {
        assert_eq!(self.shape(), rhs.shape(), "dimension mismatch in -=");
        for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
            *a = *a - b;
        }
    }
}

impl<T: Scalar + Neg<Output = T>> Neg for &DynMatrix<T> {
    type Output = DynMatrix<T>;

    fn neg(self) -> DynMatrix<T> {
        DynMatrix {
            nrows: self.nrows,
            ncols: self.ncols,
            data: self.data.iter().map(|&x| -x).collect(),
        }
    }
}

// ── Matrix multiply ─────────────────────────────────────────────────

impl<T: Scalar> Mul<&DynMatrix<T>> for &DynMatrix<T> {
    type Output = DynMatrix<T>;

    fn mul(self, rhs: &DynMatrix<T>) -> DynMatrix<T> {
        assert_eq!(
            self.ncols, rhs.nrows,
            "dimension mismatch: {}x{} * {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        let m = self.nrows;
        let n = self.ncols;
        let p = rhs.ncols;
        let mut data = vec![T::zero(); m * p];
        // Column-major j-k-i order: inner loop walks contiguous columns
        for j in 0..p {
            let out = &mut data[j * m..(j + 1) * m];
            for k in 0..n {
                let b_kj = rhs.data[j * n + k];
                let a_col = &self.data[k * m..(k + 1) * m];
                for (o, &a_ik) in out.iter_mut().zip(a_col.iter()) {
                    *o = *o + a_ik * b_kj;
                }
            }
        }
        DynMatrix { nrows: m, ncols: p, data }
    }
}

impl<T: Scalar> Mul<DynMatrix<T>> for &DynMatrix<T> {
    type Output = DynMatrix<T>;
    fn mul(self, rhs: DynMatrix<T>) -> DynMatrix<T> {
        self * &rhs
    }
}

impl<T: Scalar> Mul<&DynMatrix<T>> for DynMatrix<T> {
    type Output = DynMatrix<T>;
    fn mul(self, rhs: &DynMatrix<T>) -> DynMatrix<T> {
        &self * rhs
    }
}

impl<T: Scalar> Mul for DynMatrix<T> {
    type Output = DynMatrix<T>;
    fn mul(self, rhs: DynMatrix<T>) -> DynMatrix<T> {
        &self * &rhs
    }
}

// ── Matrix * vector ─────────────────────────────────────────────────

impl<T: Scalar> Mul<&DynVector<T>> for &DynMatrix<T> {
    type Output = DynVector<T>;

    fn mul(self, rhs: &DynVector<T>) -> DynVector<T> {
        assert_eq!(
            self.ncols,
            rhs.len(),
            "dimension mismatch: {}x{} * {}-vector",
            self.nrows,
            self.ncols,
            rhs.len(),
        );
        let m = self.nrows;
        let mut out = vec![T::zero(); m];
        for (k, &x_k) in rhs.iter().enumerate() {
            let a_col = &self.data[k * m..(k + 1) * m];
            for (o, &a_ik) in out.iter_mut().zip(a_col.iter()) {
                *o = *o + a_ik * x_k;
            }
        }
        DynVector::from_vec(out)
    }
}

impl<T: Scalar> Mul<&DynVector<T>> for DynMatrix<T> {
    type Output = DynVector<T>;
    fn mul(self, rhs: &DynVector<T>) -> DynVector<T> {
        &self * rhs
    }
}

// ── Vector add / sub ────────────────────────────────────────────────

impl<T: Scalar> Add<&DynVector<T>> for &DynVector<T> {
    type Output = DynVector<T>;

    fn add(self, rhs: &DynVector<T>) -> DynVector<T> {
        assert_eq!(self.len(), rhs.len(), "vector length mismatch");
        DynVector::from_vec(self.iter().zip(rhs.iter()).map(|(&a, &b)| a + b).collect())
    }
}

impl<T: Scalar> Sub<&DynVector<T>> for &DynVector<T> {
    type Output = DynVector<T>;

    fn sub(self, rhs: &DynVector<T>) -> DynVector<T> {
        assert_eq!(self.len(), rhs.len(), "vector length mismatch");
        DynVector::from_vec(self.iter().zip(rhs.iter()).map(|(&a, &b)| a - b).collect())
    }
}

// ── Transpose ───────────────────────────────────────────────────────

impl<T: Scalar> DynMatrix<T> {
    /// Transpose: returns an `ncols x nrows` matrix.
    ///
    /// ```
    /// use linkf::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// let t = m.transpose();
    /// assert_eq!(t.nrows(), 3);
    /// assert_eq!(t[(2, 1)], 6.0);
    /// ```
    pub fn transpose(&self) -> Self {
        DynMatrix::from_fn(self.ncols, self.nrows, |i, j| self[(j, i)])
    }
}
