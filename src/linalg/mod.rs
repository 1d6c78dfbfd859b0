pub(crate) mod lu;

pub use lu::{lu_in_place, lu_solve};

/// Errors from linear algebra operations.
///
/// Returned by decomposition constructors and convenience methods
/// (`lu`, `solve`, `inverse`).
///
/// ```
/// use linkf::DynMatrix;
/// use linkf::linalg::LinalgError;
///
/// let singular = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 4.0]);
/// assert_eq!(singular.inverse().unwrap_err(), LinalgError::Singular);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LinalgError {
    /// Matrix is singular or nearly singular.
    #[error("matrix is singular")]
    Singular,
}
