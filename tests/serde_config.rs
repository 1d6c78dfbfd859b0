use linkf::estimate::{KalmanFilter, Model};
use linkf::DynMatrix;

fn cv_model() -> Model<f64> {
    Model::new(
        DynMatrix::from_rows(2, 2, &[1.0, 0.5, 0.0, 1.0]),
        DynMatrix::eye(2, 0.0),
        DynMatrix::from_rows(2, 2, &[0.01, 0.0, 0.0, 0.02]),
        DynMatrix::from_rows(1, 2, &[1.0, 0.0]),
        DynMatrix::from_rows(1, 1, &[0.3]),
    )
    .unwrap()
}

#[test]
fn model_round_trip() {
    let model = cv_model();
    let json = serde_json::to_string(&model).unwrap();
    let back: Model<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, model);

    // Rebuilt model filters identically
    let ys = DynMatrix::from_rows(1, 3, &[0.1, f64::NAN, 0.4]);
    let a = KalmanFilter::from_model(model).filter(&ys).unwrap();
    let b = KalmanFilter::from_model(back).filter(&ys).unwrap();
    assert_eq!(a, b);
}

#[test]
fn model_from_config_text() {
    let json = r#"{
        "f": { "nrows": 1, "ncols": 1, "data": [1.0] },
        "g": { "nrows": 1, "ncols": 1, "data": [1.0] },
        "q": { "nrows": 1, "ncols": 1, "data": [0.05] },
        "h": { "nrows": 2, "ncols": 1, "data": [1.0, 2.0] },
        "r": { "nrows": 2, "ncols": 2, "data": [0.1, 0.0, 0.0, 0.1] }
    }"#;
    let model: Model<f64> = serde_json::from_str(json).unwrap();
    assert_eq!(model.state_dim(), 1);
    assert_eq!(model.measurement_dim(), 2);
    // Column-major storage
    assert_eq!(model.observation()[(1, 0)], 2.0);
}

#[test]
fn invalid_model_rejected() {
    // H has 3 columns but F is 2 x 2
    let json = r#"{
        "f": { "nrows": 2, "ncols": 2, "data": [1.0, 0.0, 0.0, 1.0] },
        "g": { "nrows": 2, "ncols": 2, "data": [1.0, 0.0, 0.0, 1.0] },
        "q": { "nrows": 2, "ncols": 2, "data": [1.0, 0.0, 0.0, 1.0] },
        "h": { "nrows": 1, "ncols": 3, "data": [1.0, 0.0, 0.0] },
        "r": { "nrows": 1, "ncols": 1, "data": [1.0] }
    }"#;
    let err = serde_json::from_str::<Model<f64>>(json).unwrap_err();
    assert!(
        err.to_string()
            .contains("column dim of H must be matched to column dim of F"),
        "unexpected error: {}",
        err
    );
}

#[test]
fn bad_matrix_length_rejected() {
    let json = r#"{ "nrows": 2, "ncols": 2, "data": [1.0, 2.0, 3.0] }"#;
    let err = serde_json::from_str::<DynMatrix<f64>>(json).unwrap_err();
    assert!(err.to_string().contains("matrix data has 3 elements, expected 2x2"));
}
