//! Linear-Gaussian state estimation: the discrete-time Kalman filter.
//!
//! The process evolves as `x' = F·x + G·w`, `w ~ N(0, Q)` and is observed as
//! `y = H·x + v`, `v ~ N(0, R)`. A [`Model`] holds the five matrices and
//! validates their dimensions once; a [`FilterState`] holds the running
//! estimate `X` and error covariance `V`; [`advance`] is the stateless
//! predict/update recursion; [`KalmanFilter`] owns one of each and drives
//! the recursion over a batch of measurement columns.
//!
//! # Missing measurements
//!
//! A measurement component that is not finite (NaN or ±∞) is *missing*.
//! A column with any missing component is not used at all: the prediction
//! stands and no partial correction is made from the observed components.
//! [`Sample`] is the typed form of a single component.
//!
//! # Example
//!
//! ```
//! use linkf::estimate::KalmanFilter;
//! use linkf::DynMatrix;
//!
//! // Random walk observed directly
//! let one = DynMatrix::from_rows(1, 1, &[1.0_f64]);
//! let q = DynMatrix::from_rows(1, 1, &[0.01]);
//! let r = DynMatrix::from_rows(1, 1, &[0.5]);
//! let mut kf = KalmanFilter::new(one.clone(), one.clone(), q, one, r).unwrap();
//!
//! let ys = DynMatrix::from_rows(1, 4, &[1.1, f64::NAN, 0.9, 1.0]);
//! let out = kf.filter(&ys).unwrap();
//! assert_eq!(out.shape(), (1, 4));
//! assert_eq!(kf.skipped(), 1);
//! ```

mod kalman;
mod model;
mod sample;
mod state;


pub use kalman::{advance, KalmanFilter, StepOutcome};
pub use model::Model;
pub use sample::Sample;
pub use state::FilterState;

/// A supplied matrix or vector violates a dimension invariant.
///
/// Raised by [`Model::new`], [`FilterState::initialize`] and by the
/// recursion when a measurement column has the wrong length or the state
/// was sized for a different model. Nothing is
/// constructed or modified when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("F must be square matrix")]
    TransitionNotSquare,
    #[error("Q must be square matrix")]
    ProcessNoiseNotSquare,
    #[error("R must be square matrix")]
    ObservationNoiseNotSquare,
    #[error("row dim of F must be matched to row dim of G")]
    NoiseInputRows,
    #[error("column dim of G must be matched to row dim of Q")]
    NoiseInputCols,
    #[error("column dim of H must be matched to column dim of F")]
    ObservationCols,
    #[error("row dim of H must be matched to row dim of R")]
    ObservationRows,
    #[error("row dim of x must be matched to column dim of F")]
    InitialStateDim,
    #[error("V must be square matrix")]
    InitialCovarianceNotSquare,
    #[error("row dim of V must be matched to row dim of F")]
    InitialCovarianceDim,
    #[error("measurement has {got} components, expected {expected}")]
    MeasurementDim { expected: usize, got: usize },
    #[error("filter state has dimension {got}, model state dim is {expected}")]
    StateDim { expected: usize, got: usize },
}

/// Errors from running the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum KalmanError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// `H·V·Hᵀ + R` could not be inverted, so no gain exists.
    ///
    /// `step` counts completed recursions since construction or the last
    /// initialization, starting at zero. The failed recursion is not
    /// counted, but its prediction has already been applied to `X` and `V`.
    #[error("innovation covariance is singular at step {step}")]
    SingularInnovation { step: usize },
}
