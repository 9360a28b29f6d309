//! Newtonian cooling model evaluation.
//!
//! ```text
//! T(t) = A + (T0 - A) * exp(-k * (t - t0))
//! ```
//!
//! The fitter relies on `predict` for residuals; the projector samples the
//! same function on a fixed 5-minute grid for plotting.

use crate::domain::CurvePoint;

/// Projection resolution in minutes.
pub const PROJECTION_STEP_MINUTES: u32 = 5;

/// Longest horizon `project` samples. Larger finite horizons are clamped.
pub const MAX_EXTRAPOLATE_HOURS: f64 = 10_000.0;

/// Predict the temperature `elapsed` hours after the anchor `(t0, T0)`.
pub fn predict(ambient: f64, start_temp: f64, decay_rate: f64, elapsed: f64) -> f64 {
    ambient + (start_temp - ambient) * (-decay_rate * elapsed).exp()
}

/// Number of samples `project` emits for a horizon (both endpoints included).
///
/// Non-finite or negative horizons collapse to the anchor sample alone;
/// horizons past `MAX_EXTRAPOLATE_HOURS` are clamped to it.
pub fn projection_len(extrapolate_hours: f64) -> usize {
    if !(extrapolate_hours.is_finite() && extrapolate_hours > 0.0) {
        return 1;
    }
    let hours = extrapolate_hours.min(MAX_EXTRAPOLATE_HOURS);
    let steps = (hours * 60.0 / PROJECTION_STEP_MINUTES as f64).ceil();
    (steps as usize).saturating_add(1)
}

/// Sample the model forward from `(start_hours, start_temp)`.
pub fn project(
    start_hours: f64,
    start_temp: f64,
    ambient: f64,
    decay_rate: f64,
    extrapolate_hours: f64,
) -> Vec<CurvePoint> {
    let n = projection_len(extrapolate_hours);
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        // Minutes first, then divide: keeps whole-hour samples exact.
        let elapsed = (i as f64 * PROJECTION_STEP_MINUTES as f64) / 60.0;
        out.push(CurvePoint {
            hours: start_hours + elapsed,
            temp: predict(ambient, start_temp, decay_rate, elapsed),
        });
    }
    out
}
