use log::debug;

use crate::dynmatrix::DynMatrix;
use crate::traits::FloatScalar;

use super::ConfigError;

/// Linear dynamical system `x' = F·x + G·w`, `y = H·x + v`.
///
/// `w ~ N(0, Q)` is the `p`-dimensional process noise and `v ~ N(0, R)` the
/// `m`-dimensional observation noise; the state has dimension `n`.
///
/// The five matrices are moved in and validated once; a `Model` is
/// immutable afterwards. The constant products the recursion needs every
/// step (`Fᵀ`, `Hᵀ`, `G·Q·Gᵀ`) are formed here once.
///
/// ```
/// use linkf::estimate::{ConfigError, Model};
/// use linkf::DynMatrix;
///
/// let f = DynMatrix::from_rows(2, 2, &[1.0_f64, 0.1, 0.0, 1.0]);
/// let g = DynMatrix::eye(2, 0.0);
/// let q = DynMatrix::from_rows(2, 2, &[0.01, 0.0, 0.0, 0.01]);
/// let h = DynMatrix::from_rows(1, 2, &[1.0, 0.0]);
/// let r = DynMatrix::from_rows(1, 1, &[0.5]);
/// let model = Model::new(f, g, q, h, r).unwrap();
/// assert_eq!(model.state_dim(), 2);
/// assert_eq!(model.measurement_dim(), 1);
///
/// // H with the wrong number of columns
/// let bad = Model::new(
///     DynMatrix::eye(2, 0.0),
///     DynMatrix::eye(2, 0.0),
///     DynMatrix::eye(2, 0.0),
///     DynMatrix::eye(3, 0.0),
///     DynMatrix::eye(3, 0.0),
/// );
/// assert_eq!(bad.unwrap_err(), ConfigError::ObservationCols);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "ModelRepr<T>",
        into = "ModelRepr<T>",
        bound(
            serialize = "T: FloatScalar + serde::Serialize",
            deserialize = "T: FloatScalar + serde::Deserialize<'de>"
        )
    )
)]
pub struct Model<T> {
    f: DynMatrix<T>,
    g: DynMatrix<T>,
    q: DynMatrix<T>,
    h: DynMatrix<T>,
    r: DynMatrix<T>,
    f_t: DynMatrix<T>,
    h_t: DynMatrix<T>,
    gqg_t: DynMatrix<T>,
}

impl<T: FloatScalar> Model<T> {
    /// Validate and build a model.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// F, Q, R square; rows(F) = rows(G); cols(G) = rows(Q);
    /// cols(H) = cols(F); rows(H) = rows(R).
    pub fn new(
        f: DynMatrix<T>,
        g: DynMatrix<T>,
        q: DynMatrix<T>,
        h: DynMatrix<T>,
        r: DynMatrix<T>,
    ) -> Result<Self, ConfigError> {
        if !f.is_square() {
            return Err(ConfigError::TransitionNotSquare);
        }
        if !q.is_square() {
            return Err(ConfigError::ProcessNoiseNotSquare);
        }
        if !r.is_square() {
            return Err(ConfigError::ObservationNoiseNotSquare);
        }
        if f.nrows() != g.nrows() {
            return Err(ConfigError::NoiseInputRows);
        }
        if g.ncols() != q.nrows() {
            return Err(ConfigError::NoiseInputCols);
        }
        if h.ncols() != f.ncols() {
            return Err(ConfigError::ObservationCols);
        }
        if h.nrows() != r.nrows() {
            return Err(ConfigError::ObservationRows);
        }

        let f_t = f.transpose();
        let h_t = h.transpose();
        let gqg_t = &(&g * &q) * &g.transpose();

        debug!(
            "kalman model: state dim {}, measurement dim {}, noise dim {}",
            f.nrows(),
            h.nrows(),
            q.nrows()
        );

        Ok(Self {
            f,
            g,
            q,
            h,
            r,
            f_t,
            h_t,
            gqg_t,
        })
    }
}

impl<T> Model<T> {
    /// State dimension `n`.
    #[inline]
    pub fn state_dim(&self) -> usize {
        self.f.nrows()
    }

    /// Measurement dimension `m`.
    #[inline]
    pub fn measurement_dim(&self) -> usize {
        self.h.nrows()
    }

    /// Process-noise dimension `p`.
    #[inline]
    pub fn noise_dim(&self) -> usize {
        self.q.nrows()
    }

    /// Transition matrix F (`n x n`).
    pub fn transition(&self) -> &DynMatrix<T> {
        &self.f
    }

    /// Process-noise input matrix G (`n x p`).
    pub fn noise_input(&self) -> &DynMatrix<T> {
        &self.g
    }

    /// Process-noise covariance Q (`p x p`).
    pub fn process_noise(&self) -> &DynMatrix<T> {
        &self.q
    }

    /// Observation matrix H (`m x n`).
    pub fn observation(&self) -> &DynMatrix<T> {
        &self.h
    }

    /// Observation-noise covariance R (`m x m`).
    pub fn observation_noise(&self) -> &DynMatrix<T> {
        &self.r
    }

    /// Process-noise covariance mapped into state space, `G·Q·Gᵀ`.
    pub fn process_covariance(&self) -> &DynMatrix<T> {
        &self.gqg_t
    }

    pub(crate) fn transition_t(&self) -> &DynMatrix<T> {
        &self.f_t
    }

    pub(crate) fn observation_t(&self) -> &DynMatrix<T> {
        &self.h_t
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct ModelRepr<T> {
    f: DynMatrix<T>,
    g: DynMatrix<T>,
    q: DynMatrix<T>,
    h: DynMatrix<T>,
    r: DynMatrix<T>,
}

#[cfg(feature = "serde")]
impl<T: FloatScalar> TryFrom<ModelRepr<T>> for Model<T> {
    type Error = ConfigError;

    fn try_from(repr: ModelRepr<T>) -> Result<Self, Self::Error> {
        Model::new(repr.f, repr.g, repr.q, repr.h, repr.r)
    }
}

#[cfg(feature = "serde")]
impl<T> From<Model<T>> for ModelRepr<T> {
    fn from(m: Model<T>) -> Self {
        ModelRepr {
            f: m.f,
            g: m.g,
            q: m.q,
            h: m.h,
            r: m.r,
        }
    }
}
