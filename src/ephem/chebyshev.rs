//! Chebyshev polynomial evaluation for ephemeris interpolation
//!
//! JPL ephemerides store each position component as Chebyshev coefficients
//! over short time intervals. Only position evaluation is needed here; the
//! velocity half of Type 3 records is ignored by the callers.

use crate::ephem::errors::{EphemError, Result};

/// Map an ephemeris time onto a record's [-1, 1] evaluation domain
///
/// `mid` and `radius` are the record's midpoint and half-width in the same
/// units as `et` (TDB seconds past J2000).
pub fn normalize_time(et: f64, mid: f64, radius: f64) -> Result<f64> {
    if radius <= 0.0 {
        return Err(EphemError::InvalidFormat(format!(
            "Non-positive record radius: {}",
            radius
        )));
    }
    let x = (et - mid) / radius;
    // Tolerate boundary rounding but reject genuinely foreign times
    if !(-1.000001..=1.000001).contains(&x) {
        return Err(EphemError::InvalidFormat(format!(
            "Time {} outside record domain (mid={}, radius={})",
            et, mid, radius
        )));
    }
    Ok(x.clamp(-1.0, 1.0))
}

/// Evaluate a Chebyshev series at x in [-1, 1]
///
/// Coefficients are ordered lowest degree first:
/// f(x) = c0*T0(x) + c1*T1(x) + ... + cn*Tn(x),
/// computed with the recurrence T_n(x) = 2x*T_{n-1}(x) - T_{n-2}(x).
pub fn evaluate(coefficients: &[f64], x: f64) -> f64 {
    let mut iter = coefficients.iter();
    let c0 = match iter.next() {
        Some(&c) => c,
        None => return 0.0,
    };

    let mut sum = c0;
    let mut t_prev = 1.0; // T_0(x)
    let mut t_cur = x; // T_1(x)
    for &c in iter {
        sum += c * t_cur;
        let t_next = 2.0 * x * t_cur - t_prev;
        t_prev = t_cur;
        t_cur = t_next;
    }
    sum
}
