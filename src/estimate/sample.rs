use crate::traits::FloatScalar;

/// One measurement component: observed, or missing for this time step.
///
/// The raw batch form encodes a missing component as any non-finite
/// value; [`Sample::from_raw`] and [`Sample::into_raw`] convert between
/// the two. A measurement column is used by the filter only when every
/// one of its samples is present.
///
/// ```
/// use linkf::estimate::Sample;
///
/// assert_eq!(Sample::from_raw(1.5_f64), Sample::Present(1.5));
/// assert_eq!(Sample::from_raw(f64::NAN), Sample::Missing);
/// assert!(Sample::<f64>::Missing.into_raw().is_nan());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample<T> {
    Present(T),
    Missing,
}

impl<T: FloatScalar> Sample<T> {
    /// Classify a raw value: non-finite (NaN, ±∞) is missing.
    #[inline]
    pub fn from_raw(value: T) -> Self {
        if value.is_finite() {
            Sample::Present(value)
        } else {
            Sample::Missing
        }
    }

    /// Raw encoding: missing becomes NaN.
    #[inline]
    pub fn into_raw(self) -> T {
        match self {
            Sample::Present(v) => v,
            Sample::Missing => T::nan(),
        }
    }
}

impl<T: FloatScalar> From<Option<T>> for Sample<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Sample::Missing, Sample::from_raw)
    }
}
