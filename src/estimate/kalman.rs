use alloc::vec::Vec;

use log::{debug, trace};

use crate::dynmatrix::{DynMatrix, DynVector};
use crate::traits::FloatScalar;

use super::model::Model;
use super::sample::Sample;
use super::state::FilterState;
use super::{ConfigError, KalmanError};

/// Result of one recursion.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome<T> {
    /// Filtered measurement estimate `H·X` after the step.
    pub output: DynVector<T>,
    /// Whether the measurement was used. `false` when any component was
    /// missing and only the prediction was applied.
    pub updated: bool,
}

/// Advance `state` by one time step against measurement `y`.
///
/// Prediction always runs:
///
/// ```text
/// X ← F·X
/// V ← F·V·Fᵀ + G·Q·Gᵀ
/// D ← (H·V·Hᵀ + R)⁻¹
/// K ← V·Hᵀ·D
/// ```
///
/// The correction runs only if every component of `y` is finite:
///
/// ```text
/// X ← X + K·(y − H·X)
/// V ← (I − K·H)·V
/// ```
///
/// The gain is formed before `y` is inspected, so a singular innovation
/// covariance is an error even for a column that would have been skipped.
/// On that error `X` and `V` keep the prediction for this step but the step
/// counter is not advanced; calling again predicts once more under the same
/// step index.
///
/// A state sized for a different model is rejected with
/// [`ConfigError::StateDim`] and a wrong-length `y` with
/// [`ConfigError::MeasurementDim`], both before anything is modified.
pub fn advance<T: FloatScalar>(
    model: &Model<T>,
    state: &mut FilterState<T>,
    y: &DynVector<T>,
) -> Result<StepOutcome<T>, KalmanError> {
    let n = model.state_dim();
    if state.eye.nrows() != n || state.x.len() != n || state.v.nrows() != n {
        return Err(ConfigError::StateDim {
            expected: n,
            got: state.eye.nrows(),
        }
        .into());
    }

    let m = model.measurement_dim();
    if y.len() != m {
        return Err(ConfigError::MeasurementDim {
            expected: m,
            got: y.len(),
        }
        .into());
    }

    let f = model.transition();
    let h = model.observation();
    let step = state.steps;

    // Predict
    state.x = f * &state.x;
    state.v = &(&(f * &state.v) * model.transition_t()) + model.process_covariance();

    // Innovation covariance and gain
    let s = &(&(h * &state.v) * model.observation_t()) + model.observation_noise();
    let d = s.inverse().map_err(|_| {
        debug!("step {}: innovation covariance is singular", step);
        KalmanError::SingularInnovation { step }
    })?;
    let k = &(&state.v * model.observation_t()) * &d;

    let missing = y.iter().filter(|c| !c.is_finite()).count();
    let updated = missing == 0;

    if updated {
        let e = y - &(h * &state.x);
        state.x = &state.x + &(&k * &e);
        state.v = &(&state.eye - &(&k * h)) * &state.v;
    } else {
        debug!(
            "step {}: {} of {} components missing, update skipped",
            step, missing, m
        );
        state.skipped += 1;
    }
    state.steps += 1;

    trace!("step {}: updated = {}", step, updated);

    Ok(StepOutcome {
        output: h * &state.x,
        updated,
    })
}

/// Discrete-time linear Kalman filter.
///
/// Owns an immutable [`Model`] and the [`FilterState`] it advances. The
/// state persists across calls: filtering `[a, b]` and then `[c]` gives the
/// same output for `c` as filtering `[a, b, c]` at once.
///
/// One instance is one estimation task; sharing an instance between
/// threads needs external locking.
///
/// # Example
///
/// ```
/// use linkf::estimate::KalmanFilter;
/// use linkf::{DynMatrix, DynVector};
///
/// // Constant velocity, position measured
/// let dt = 0.1;
/// let f = DynMatrix::from_rows(2, 2, &[1.0, dt, 0.0, 1.0]);
/// let g = DynMatrix::eye(2, 0.0);
/// let q = DynMatrix::from_rows(2, 2, &[1e-4, 0.0, 0.0, 1e-4]);
/// let h = DynMatrix::from_rows(1, 2, &[1.0, 0.0]);
/// let r = DynMatrix::from_rows(1, 1, &[0.25]);
///
/// let mut kf = KalmanFilter::new(f, g, q, h, r).unwrap();
/// kf.initialize(
///     Some(DynVector::from_slice(&[0.0, 1.0])),
///     Some(DynMatrix::eye(2, 0.0)),
/// ).unwrap();
///
/// let y = kf.step(&DynVector::from_slice(&[0.12])).unwrap();
/// assert_eq!(y.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct KalmanFilter<T> {
    model: Model<T>,
    state: FilterState<T>,
}

impl<T: FloatScalar> KalmanFilter<T> {
    /// Validate `(F, G, Q, H, R)` and build a filter with zero state and
    /// zero covariance.
    pub fn new(
        f: DynMatrix<T>,
        g: DynMatrix<T>,
        q: DynMatrix<T>,
        h: DynMatrix<T>,
        r: DynMatrix<T>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::from_model(Model::new(f, g, q, h, r)?))
    }

    /// Build a filter around an already validated model.
    pub fn from_model(model: Model<T>) -> Self {
        let state = FilterState::new(&model);
        Self { model, state }
    }

    /// Reset state and covariance. See [`FilterState::initialize`].
    pub fn initialize(
        &mut self,
        x: Option<DynVector<T>>,
        v: Option<DynMatrix<T>>,
    ) -> Result<(), ConfigError> {
        self.state.initialize(&self.model, x, v)
    }

    /// Run one recursion and return the filtered output `H·X`.
    pub fn step(&mut self, y: &DynVector<T>) -> Result<DynVector<T>, KalmanError> {
        Ok(advance(&self.model, &mut self.state, y)?.output)
    }

    /// [`step`](Self::step) from typed samples. Any [`Sample::Missing`]
    /// turns the step into a prediction only.
    pub fn step_samples(&mut self, y: &[Sample<T>]) -> Result<DynVector<T>, KalmanError> {
        let raw: Vec<T> = y.iter().map(|s| s.into_raw()).collect();
        self.step(&DynVector::from_vec(raw))
    }

    /// Filter a batch of measurement columns (`m x k`), returning the
    /// `m x k` matrix whose column `j` is `H·X` after column `j`.
    ///
    /// Columns are processed strictly left to right. The batch itself is
    /// left untouched. The first singular innovation covariance aborts the
    /// batch; the columns already processed remain applied to the state.
    pub fn filter(&mut self, batch: &DynMatrix<T>) -> Result<DynMatrix<T>, KalmanError> {
        let m = self.model.measurement_dim();
        if batch.nrows() != m {
            return Err(ConfigError::MeasurementDim {
                expected: m,
                got: batch.nrows(),
            }
            .into());
        }

        let k = batch.ncols();
        let mut out = DynMatrix::zeros(m, k, T::zero());
        for (j, y) in batch.columns().enumerate() {
            let outcome = advance(&self.model, &mut self.state, &y)?;
            out.set_col(j, &outcome.output);
        }

        debug!(
            "filtered {} columns, {} skipped since initialization",
            k, self.state.skipped
        );
        Ok(out)
    }
}

impl<T> KalmanFilter<T> {
    pub fn model(&self) -> &Model<T> {
        &self.model
    }

    pub fn filter_state(&self) -> &FilterState<T> {
        &self.state
    }

    /// Current state estimate `X`.
    pub fn state(&self) -> &DynVector<T> {
        self.state.state()
    }

    /// Current error covariance `V`.
    pub fn covariance(&self) -> &DynMatrix<T> {
        self.state.covariance()
    }

    pub fn steps(&self) -> usize {
        self.state.steps()
    }

    pub fn skipped(&self) -> usize {
        self.state.skipped()
    }
}
