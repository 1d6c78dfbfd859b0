use crate::linalg::LinalgError;
use crate::traits::{FloatScalar, MatrixMut, MatrixRef};

/// Perform LU decomposition with partial pivoting, in place.
///
/// On return, `a` contains both L and U packed together:
/// - Upper triangle (including diagonal): U
/// - Lower triangle (excluding diagonal): L (diagonal of L is implicitly 1)
///
/// `perm` is filled with the row permutation indices.
/// Returns `true` if the number of row swaps was even.
///
/// The singularity test is relative to the scale of the input. A pivot
/// that is not finite or is no larger than `n·ε·max|a_ij|` marks the
/// matrix as singular. No regularization is attempted.
pub fn lu_in_place<T: FloatScalar>(
    a: &mut impl MatrixMut<T>,
    perm: &mut [usize],
) -> Result<bool, LinalgError> {
    let n = a.nrows();
    assert_eq!(n, a.ncols(), "LU decomposition requires a square matrix");
    assert_eq!(n, perm.len(), "permutation slice length must match matrix size");

    for (i, p) in perm.iter_mut().enumerate() {
        *p = i;
    }

    let mut scale = T::zero();
    for j in 0..n {
        for i in 0..n {
            let v = a.get(i, j).abs();
            if v > scale {
                scale = v;
            }
        }
    }
    let tol = num_traits::cast::<usize, T>(n).unwrap_or_else(T::one) * T::epsilon() * scale;

    let mut even = true;

    for col in 0..n {
        // Partial pivoting: largest magnitude at or below the diagonal
        let mut max_row = col;
        let mut max_val = a.get(col, col).abs();
        for row in (col + 1)..n {
            let val = a.get(row, col).abs();
            if val > max_val {
                max_val = val;
                max_row = row;
            }
        }

        if !max_val.is_finite() || max_val <= tol {
            return Err(LinalgError::Singular);
        }

        if max_row != col {
            perm.swap(col, max_row);
            a.swap_rows(col, max_row);
            even = !even;
        }

        let inv_pivot = T::one() / *a.get(col, col);

        for row in (col + 1)..n {
            let l = *a.get(row, col) * inv_pivot;
            *a.get_mut(row, col) = l;
            if l == T::zero() {
                continue;
            }
            for j in (col + 1)..n {
                let u = *a.get(col, j);
                let cell = a.get_mut(row, j);
                *cell = *cell - l * u;
            }
        }
    }

    Ok(even)
}

/// Solve Ax = b given the packed LU decomposition and permutation.
///
/// `lu` is the packed L/U matrix from `lu_in_place`.
/// `perm` is the row permutation from `lu_in_place`.
/// `b` (input) and `x` (output) are separate slices of length n.
pub fn lu_solve<T: FloatScalar>(lu: &impl MatrixRef<T>, perm: &[usize], b: &[T], x: &mut [T]) {
    let n = lu.nrows();
    debug_assert_eq!(b.len(), n);
    debug_assert_eq!(x.len(), n);

    // Forward substitution: Ly = Pb
    for i in 0..n {
        let mut sum = b[perm[i]];
        for j in 0..i {
            sum = sum - *lu.get(i, j) * x[j];
        }
        x[i] = sum;
    }

    // Back substitution: Ux = y
    for i in (0..n).rev() {
        let mut sum = x[i];
        for j in (i + 1)..n {
            sum = sum - *lu.get(i, j) * x[j];
        }
        x[i] = sum / *lu.get(i, i);
    }
}
