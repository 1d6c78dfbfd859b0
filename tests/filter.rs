use approx::{assert_abs_diff_eq, assert_relative_eq};
use linkf::estimate::{advance, FilterState, KalmanFilter, Model, Sample};
use linkf::{ConfigError, DynMatrix, DynVector, KalmanError};

const DT: f64 = 0.1;

/// Constant velocity with acceleration noise, position measured.
fn constant_velocity(q: f64, r: f64) -> Model<f64> {
    Model::new(
        DynMatrix::from_rows(2, 2, &[1.0, DT, 0.0, 1.0]),
        DynMatrix::from_rows(2, 1, &[0.5 * DT * DT, DT]),
        DynMatrix::from_rows(1, 1, &[q]),
        DynMatrix::from_rows(1, 2, &[1.0, 0.0]),
        DynMatrix::from_rows(1, 1, &[r]),
    )
    .unwrap()
}

/// Deterministic pseudo-noise in [-0.5, 0.5).
fn jitter(i: usize) -> f64 {
    let x = (i as u64).wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    ((x >> 11) as f64 / (1u64 << 53) as f64) - 0.5
}

// ── End-to-end ──────────────────────────────────────────────────────

#[test]
fn tracks_noisy_ramp() {
    let mut kf = KalmanFilter::from_model(constant_velocity(1e-3, 0.04));
    kf.initialize(None, Some(DynMatrix::from_rows(2, 2, &[25.0, 0.0, 0.0, 25.0])))
        .unwrap();

    let k = 400;
    let truth = |j: usize| 2.0 - 0.75 * (j as f64 + 1.0) * DT;
    let ys = DynMatrix::from_fn(1, k, |_, j| truth(j) + 0.4 * jitter(j));

    let out = kf.filter(&ys).unwrap();
    assert_eq!(out.shape(), (1, k));

    // Filtered error well below the raw measurement spread
    let tail = (k - 100)..k;
    let raw: f64 = tail.clone().map(|j| (ys[(0, j)] - truth(j)).abs()).sum::<f64>() / 100.0;
    let filt: f64 = tail.map(|j| (out[(0, j)] - truth(j)).abs()).sum::<f64>() / 100.0;
    assert!(filt < raw, "filtered {} vs raw {}", filt, raw);
    assert_abs_diff_eq!(kf.state()[1], -0.75, epsilon = 0.1);
}

#[test]
fn covariance_reaches_steady_state() {
    let mut kf = KalmanFilter::from_model(constant_velocity(0.1, 0.5));
    kf.initialize(None, Some(DynMatrix::eye(2, 0.0))).unwrap();

    let ys = DynMatrix::from_fn(1, 500, |_, j| jitter(j));
    kf.filter(&ys).unwrap();
    let settled = kf.covariance().clone();

    kf.filter(&DynMatrix::from_fn(1, 10, |_, j| jitter(j + 500))).unwrap();
    for i in 0..2 {
        for j in 0..2 {
            assert_relative_eq!(kf.covariance()[(i, j)], settled[(i, j)], max_relative = 1e-9);
        }
    }
}

#[test]
fn multichannel_measurement() {
    // Position and velocity both measured
    let h = DynMatrix::eye(2, 0.0);
    let r = DynMatrix::from_rows(2, 2, &[0.2, 0.0, 0.0, 0.05]);
    let m = constant_velocity(1e-2, 1.0);
    let model = Model::new(
        m.transition().clone(),
        m.noise_input().clone(),
        m.process_noise().clone(),
        h,
        r,
    )
    .unwrap();
    assert_eq!(model.measurement_dim(), 2);

    let mut kf = KalmanFilter::from_model(model);
    kf.initialize(None, Some(DynMatrix::eye(2, 0.0))).unwrap();

    let ys = DynMatrix::from_fn(2, 200, |i, j| if i == 0 { 0.3 * j as f64 * DT } else { 0.3 });
    let out = kf.filter(&ys).unwrap();
    assert_abs_diff_eq!(out[(0, 199)], ys[(0, 199)], epsilon = 0.05);
    assert_abs_diff_eq!(out[(1, 199)], 0.3, epsilon = 0.05);
}

// ── Missing data ────────────────────────────────────────────────────

#[test]
fn gap_widens_covariance() {
    let mut kf = KalmanFilter::from_model(constant_velocity(0.05, 0.1));
    kf.initialize(None, Some(DynMatrix::eye(2, 0.0))).unwrap();
    kf.filter(&DynMatrix::from_fn(1, 50, |_, j| j as f64 * DT)).unwrap();

    let mut prev = kf.covariance()[(0, 0)];
    for _ in 0..10 {
        kf.step_samples(&[Sample::Missing]).unwrap();
        let v = kf.covariance()[(0, 0)];
        assert!(v > prev);
        prev = v;
    }
    assert_eq!(kf.skipped(), 10);

    let mut predicted = kf.clone();
    predicted.step_samples(&[Sample::Missing]).unwrap();
    kf.step_samples(&[Sample::Present(6.0)]).unwrap();
    assert!(kf.covariance()[(0, 0)] < predicted.covariance()[(0, 0)]);
    assert!(kf.covariance()[(0, 0)] < 0.1);
}

#[test]
fn gap_extrapolates_velocity() {
    let mut kf = KalmanFilter::from_model(constant_velocity(1e-4, 0.01));
    kf.initialize(None, Some(DynMatrix::eye(2, 0.0))).unwrap();
    kf.filter(&DynMatrix::from_fn(1, 300, |_, j| (j as f64 + 1.0) * DT)).unwrap();

    // Position keeps advancing at the estimated unit velocity
    let before = kf.state()[0];
    let out = kf.filter(&DynMatrix::from_fn(1, 5, |_, _| f64::NAN)).unwrap();
    for j in 0..5 {
        assert_abs_diff_eq!(out[(0, j)], before + (j as f64 + 1.0) * DT, epsilon = 1e-2);
    }
}

// ── Stateless recursion ─────────────────────────────────────────────

#[test]
fn advance_matches_filter() {
    let model = constant_velocity(0.01, 0.2);
    let ys = DynMatrix::from_fn(1, 20, |_, j| 0.1 * j as f64 + jitter(j));

    let mut state = FilterState::new(&model);
    state
        .initialize(&model, Some(DynVector::from_slice(&[0.0, 1.0])), None)
        .unwrap();
    let mut kf = KalmanFilter::from_model(model.clone());
    kf.initialize(Some(DynVector::from_slice(&[0.0, 1.0])), None).unwrap();

    let out = kf.filter(&ys).unwrap();
    for (j, y) in ys.columns().enumerate() {
        let outcome = advance(&model, &mut state, &y).unwrap();
        assert!(outcome.updated);
        assert_eq!(outcome.output, out.col(j));
    }
    assert_eq!(&state, kf.filter_state());
}

#[test]
fn errors_surface_through_public_api() {
    let err = KalmanFilter::<f64>::new(
        DynMatrix::eye(2, 0.0),
        DynMatrix::eye(2, 0.0),
        DynMatrix::eye(2, 0.0),
        DynMatrix::eye(2, 0.0),
        DynMatrix::eye(3, 0.0),
    )
    .unwrap_err();
    assert_eq!(err, ConfigError::ObservationRows);
    assert_eq!(err.to_string(), "row dim of H must be matched to row dim of R");

    let zero = DynMatrix::from_rows(1, 1, &[0.0]);
    let one = DynMatrix::eye(1, 0.0);
    let mut kf = KalmanFilter::new(one.clone(), zero.clone(), zero.clone(), one, zero).unwrap();
    let err = kf.filter(&DynMatrix::from_rows(1, 2, &[1.0, 2.0])).unwrap_err();
    assert!(matches!(err, KalmanError::SingularInnovation { step: 0 }));
}
