//! Numeric primitives shared by the summarizer and the detectors
//!
//! Every ratio in the crate goes through `denom`/`ratio`, so a zero
//! denominator is substituted with 1 the same way everywhere.

/// Denominator guard: `x` unless it is zero, then 1
///
/// # Example
/// ```
/// use adsight::stats::denom;
///
/// assert_eq!(denom(4.0), 4.0);
/// assert_eq!(denom(0.0), 1.0);
/// assert_eq!(denom(-0.0), 1.0);
/// ```
pub fn denom(x: f64) -> f64 {
    if x != 0.0 {
        x
    } else {
        1.0
    }
}

/// `numerator / denom(denominator)`
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    numerator / denom(denominator)
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Ordinary least-squares slope of `values` against their 0-based index
///
/// `None` with fewer than two points.
///
/// # Example
/// ```
/// use adsight::stats::ols_slope;
///
/// let slope = ols_slope(&[0.05, 0.04, 0.03]).unwrap();
/// assert!((slope + 0.01).abs() < 1e-12);
/// ```
pub fn ols_slope(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = mean(values)?;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        sxy += dx * (y - y_mean);
        sxx += dx * dx;
    }
    Some(sxy / sxx)
}

/// Pearson correlation coefficient
///
/// `None` when the series differ in length, have fewer than two points, or
/// either has zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let x_mean = mean(x)?;
    let y_mean = mean(y)?;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - x_mean;
        let dy = b - y_mean;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    let r = sxy / (sxx.sqrt() * syy.sqrt());
    Some(r.clamp(-1.0, 1.0))
}
