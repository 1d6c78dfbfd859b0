use log::debug;

use crate::dynmatrix::{DynMatrix, DynVector};
use crate::traits::FloatScalar;

use super::model::Model;
use super::ConfigError;

/// Running estimate of a [`Model`]'s hidden state.
///
/// Holds the state estimate `X` (length `n`), its error covariance `V`
/// (`n x n`) and the `n x n` identity used by the covariance update. Only
/// [`FilterState::initialize`] and the recursion ([`super::advance`])
/// modify it; callers get read-only views.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState<T> {
    pub(super) x: DynVector<T>,
    pub(super) v: DynMatrix<T>,
    pub(super) eye: DynMatrix<T>,
    pub(super) steps: usize,
    pub(super) skipped: usize,
}

impl<T: FloatScalar> FilterState<T> {
    /// Zero state and zero covariance sized for `model`.
    pub fn new(model: &Model<T>) -> Self {
        let n = model.state_dim();
        Self {
            x: DynVector::zeros(n, T::zero()),
            v: DynMatrix::zeros(n, n, T::zero()),
            eye: DynMatrix::eye(n, T::zero()),
            steps: 0,
            skipped: 0,
        }
    }

    /// Reset the estimate in place.
    ///
    /// - `x`: `None` resets to the zero vector; otherwise it must have
    ///   length `n`.
    /// - `v`: `None` resets to the process-noise covariance `G·Q·Gᵀ`;
    ///   otherwise it must be `n x n`.
    ///
    /// `model` must have the state dimension this state was created for.
    /// Both arguments are checked before either is stored, so on error
    /// the state is exactly as it was. The step counters restart at zero.
    pub fn initialize(
        &mut self,
        model: &Model<T>,
        x: Option<DynVector<T>>,
        v: Option<DynMatrix<T>>,
    ) -> Result<(), ConfigError> {
        let n = model.state_dim();
        if self.eye.nrows() != n {
            return Err(ConfigError::StateDim {
                expected: n,
                got: self.eye.nrows(),
            });
        }

        if let Some(x) = &x {
            if x.len() != n {
                return Err(ConfigError::InitialStateDim);
            }
        }
        if let Some(v) = &v {
            if !v.is_square() {
                return Err(ConfigError::InitialCovarianceNotSquare);
            }
            if v.nrows() != n {
                return Err(ConfigError::InitialCovarianceDim);
            }
        }

        debug!(
            "kalman state initialized: explicit x = {}, explicit V = {}",
            x.is_some(),
            v.is_some()
        );

        self.x = x.unwrap_or_else(|| DynVector::zeros(n, T::zero()));
        self.v = v.unwrap_or_else(|| model.process_covariance().clone());
        self.steps = 0;
        self.skipped = 0;
        Ok(())
    }
}

impl<T> FilterState<T> {
    /// Current state estimate `X`.
    #[inline]
    pub fn state(&self) -> &DynVector<T> {
        &self.x
    }

    /// Current error covariance `V`.
    #[inline]
    pub fn covariance(&self) -> &DynMatrix<T> {
        &self.v
    }

    /// The `n x n` identity fixed at creation.
    #[inline]
    pub fn identity(&self) -> &DynMatrix<T> {
        &self.eye
    }

    /// Recursions run since creation or the last initialization.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// How many of those recursions skipped the update for missing data.
    #[inline]
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}
