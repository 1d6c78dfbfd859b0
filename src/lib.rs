//! # linkf
//!
//! Discrete-time linear-Gaussian state estimation (the Kalman filter) over
//! runtime-sized dense matrices. `no_std` compatible with `alloc`.
//!
//! ## Quick start
//!
//! ```
//! use linkf::estimate::KalmanFilter;
//! use linkf::DynMatrix;
//!
//! // Scalar random walk: x' = x + w, y = x + v
//! let one = DynMatrix::from_rows(1, 1, &[1.0_f64]);
//! let q = DynMatrix::from_rows(1, 1, &[1e-3]);
//! let r = DynMatrix::from_rows(1, 1, &[0.1]);
//! let mut kf = KalmanFilter::new(one.clone(), one.clone(), q, one, r).unwrap();
//!
//! // One measurement per column; NaN marks a missing sample
//! let ys = DynMatrix::from_rows(1, 5, &[0.9, 1.1, f64::NAN, 1.0, 0.95]);
//! let filtered = kf.filter(&ys).unwrap();
//! assert_eq!(filtered.ncols(), 5);
//! ```
//!
//! ## Modules
//!
//! - [`estimate`]: [`Model`](estimate::Model) (validated `F, G, Q, H, R`),
//!   [`FilterState`](estimate::FilterState) (`X`, `V`), the one-step
//!   recursion [`advance`](estimate::advance), and the
//!   [`KalmanFilter`](estimate::KalmanFilter) handle with its batch driver.
//!
//! - [`dynmatrix`]: Heap-allocated `DynMatrix<T>` with runtime dimensions,
//!   column-major `Vec<T>` storage, and the column vector [`DynVector<T>`].
//!   Arithmetic, transpose, identity, column get/set, LU-based inverse.
//!
//! - [`linalg`]: In-place LU decomposition with partial pivoting, generic
//!   over [`MatrixMut`].
//!
//! - [`traits`]: Element traits [`Scalar`] / [`FloatScalar`] and the
//!   [`MatrixRef`] / [`MatrixMut`] access traits.
//!
//! ## Cargo features
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std`   | yes     | Hardware FPU via system libm; `libm` crate otherwise |
//! | `serde` | no      | Serialize / deserialize matrices and validated models |
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`](https://docs.rs/log) facade at
//! `debug` and `trace` level. Install any logger to see them.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod dynmatrix;
pub mod estimate;
pub mod linalg;
pub mod traits;

pub use dynmatrix::{DynMatrix, DynVector};
pub use estimate::{ConfigError, KalmanError, KalmanFilter, Model, Sample};
pub use traits::{FloatScalar, MatrixMut, MatrixRef, Scalar};
